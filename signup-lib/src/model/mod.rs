//! Form data types.

mod fields;
mod user;

pub use fields::*;
pub use user::*;
