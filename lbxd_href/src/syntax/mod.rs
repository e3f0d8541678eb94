//! Route grammar and error types
//!
//! The entry points here are pure: no I/O, no logging, no shared state.
//! Callers that want events recorded go through `batch` or the CLI.

pub mod error;
pub mod parser;

pub use error::{HrefError, HrefParseError, HrefResult};
pub use parser::{parse_href, parse_href_with, parse_tokens, ParseOptions};
