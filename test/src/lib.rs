#![forbid(unsafe_code)]
#![deny(trivial_casts, trivial_numeric_casts)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

mod statement;
mod validator;

pub use crate::context::*;
pub use crate::fixtures::*;
pub use crate::public_key::*;
pub use crate::statement::*;
pub use crate::validator::*;
