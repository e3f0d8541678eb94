//! Letterboxd href grammar
//!
//! Parses site paths and URLs into typed [`Route`] descriptors and renders
//! descriptors back into canonical paths. The parser and serializer are pure;
//! the batch driver and CLI add file handling and logging around them.

#[macro_use]
pub mod logging;

pub mod batch;
pub mod config;
pub mod grammar;
pub mod lint;
pub mod serializer;
pub mod syntax;
pub mod tokens;
pub mod urls;

pub use batch::{BatchConfig, BatchError, BatchResults};
pub use grammar::filters::FilterBag;
pub use grammar::route::{Route, UserPage};
pub use lint::{lint_filters, LintWarning};
pub use serializer::{serialize, serialize_filters, to_href};
pub use syntax::{
    parse_href, parse_href_with, parse_tokens, HrefError, HrefParseError, HrefResult, ParseOptions,
};
