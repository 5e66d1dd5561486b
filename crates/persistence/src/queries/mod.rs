// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `officers`: Officer lookups, listings and password verification
//! - `sessions`: Session lookups
//! - `returns`: Monthly return lookups
//! - `audit`: Audit event reconstruction

pub mod audit;
pub mod officers;
pub mod returns;
pub mod sessions;
