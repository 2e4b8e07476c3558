//! Utility Modules
//!
//! - `assertions`: account checks, state loading and checked math
//! - `authority`: the company authority gate shared by mutating instructions
//! - `cpi`: calls into the system, token and associated token programs

pub mod assertions;
pub mod authority;
pub mod cpi;

pub use assertions::*;
pub use authority::*;
pub use cpi::*;
