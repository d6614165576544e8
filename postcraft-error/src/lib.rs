//! # postcraft-error
//!
//! Unified error handling for postcraft.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ConfigInvalid, RateLimited)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use postcraft_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::EmptyResponse, "model returned no content")
//!         .with_operation("pipeline::draft")
//!         .with_context("model", "llama-3.3-70b-versatile"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, postcraft_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent layers only append context

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using postcraft Error
pub type Result<T> = std::result::Result<T, Error>;
