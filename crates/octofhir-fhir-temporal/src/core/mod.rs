//! Core error types and error codes

pub mod error;
pub mod error_code;

pub use error::*;
pub use error_code::*;
