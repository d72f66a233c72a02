// Copyright (c) 2019 Alain Brenzikofer
// This file is part of Encointer
//
// Encointer is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Encointer is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Encointer.  If not, see <http://www.gnu.org/licenses/>.

//! Public signal layout shared by the circuit, the prover and the on-chain verifier.
//!
//! Signals are position-significant. Every consumer indexes through these constants.

/// Number of slots in the nationality allow-list. Unused slots are zero.
pub const MAX_COUNTRIES: usize = 5;

pub const AGE_FLAG: usize = 0;
pub const REQUIRED_AGE: usize = 1;
pub const GENDER_FLAG: usize = 2;
pub const REQUIRED_GENDER: usize = 3;
pub const NATIONALITY_FLAG: usize = 4;
/// First allow-list slot. Slots occupy `COUNTRIES..COUNTRIES + MAX_COUNTRIES`.
pub const COUNTRIES: usize = 5;
pub const ROOT: usize = COUNTRIES + MAX_COUNTRIES;

/// Signals describing the policy, i.e. everything but the commitment root
pub const POLICY_COUNT: usize = ROOT;
pub const COUNT: usize = ROOT + 1;
