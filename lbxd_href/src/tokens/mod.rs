//! Token stream for href parsing
//!
//! Normalizes a URL or bare path into a sequence of `/`-delimited tokens and
//! provides the forward-only cursor every grammar function reads from.
//! Tokens are raw segment text; nothing is percent-decoded.

pub mod href_tokens;

pub use href_tokens::{tokenize_href, HrefTokens, NormalizedHref};
