//! Base types and error handling.
//!
//! - [`ConsentError`](error::ConsentError): the crate's error taxonomy

pub mod error;

pub use error::ConsentError;
