//! Href normalization and the forward-only token cursor

use crate::config::compile_time::site;
use crate::syntax::error::{HrefError, HrefParseError};

/// Result of normalizing a raw href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedHref {
    /// `/`, or a path with no non-empty segments
    Root,
    Path(HrefTokens),
}

/// Split a URL or bare path into tokens.
///
/// A full URL must name the site host (case-insensitive). The remaining path
/// must start with `/`; one trailing slash is recorded and empty segments are
/// dropped.
pub fn tokenize_href(href: &str) -> Result<NormalizedHref, HrefError> {
    let path = strip_site_prefix(href)?;

    if !path.starts_with('/') {
        return Err(HrefError::malformed(href, "Invalid href"));
    }

    let trailing_slash = path.len() > 1 && path.ends_with('/');
    let pieces: Vec<String> = path[1..]
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if pieces.is_empty() {
        return Ok(NormalizedHref::Root);
    }

    Ok(NormalizedHref::Path(HrefTokens::new(pieces, trailing_slash)))
}

/// Strip `scheme://host` when present and check the host
fn strip_site_prefix(href: &str) -> Result<&str, HrefError> {
    let Some(scheme_end) = href.find("://") else {
        return Ok(href);
    };

    let after_scheme = &href[scheme_end + 3..];
    let Some(path_start) = after_scheme.find('/') else {
        let host = after_scheme;
        if !host.eq_ignore_ascii_case(site::HOST) {
            return Err(HrefError::invalid_host(host));
        }
        return Err(HrefError::malformed(href, "Invalid film list URL"));
    };

    let host = &after_scheme[..path_start];
    if !host.eq_ignore_ascii_case(site::HOST) {
        return Err(HrefError::invalid_host(host));
    }

    Ok(&after_scheme[path_start..])
}

/// Token sequence plus cursor for one parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefTokens {
    pieces: Vec<String>,
    position: usize,
    trailing_slash: bool,
}

impl HrefTokens {
    pub fn new(pieces: Vec<String>, trailing_slash: bool) -> Self {
        Self {
            pieces,
            position: 0,
            trailing_slash,
        }
    }

    /// Build from a slash-joined path without normalization (tests and tools)
    pub fn from_path(path: &str) -> Self {
        let trailing_slash = path.ends_with('/');
        let pieces = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(pieces, trailing_slash)
    }

    // === CURSOR ===

    pub fn current(&self) -> Option<&str> {
        self.peek_ahead(0)
    }

    /// Token `n` places past the cursor
    pub fn peek_ahead(&self, n: usize) -> Option<&str> {
        self.pieces.get(self.position + n).map(String::as_str)
    }

    /// Move the cursor forward; never past the end
    pub fn advance_by(&mut self, n: usize) {
        self.position = (self.position + n).min(self.pieces.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.pieces.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.pieces.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Unparsed tokens joined with `/`; `None` when nothing remains
    pub fn remaining_href(&self) -> Option<String> {
        if self.is_at_end() {
            None
        } else {
            Some(self.pieces[self.position..].join("/"))
        }
    }

    // === ERRORS ===

    /// Parse error at the cursor
    pub fn error(&self, offset: usize, reason: &str) -> HrefParseError {
        HrefParseError::new(&self.pieces, self.position, offset, reason)
    }

    // === DIAGNOSTICS ===

    pub fn diagnostic(&self) -> String {
        format!(
            "HrefTokens(pos: {}/{}, current: {:?})",
            self.position,
            self.pieces.len(),
            self.current()
        )
    }

    /// Tokens around the cursor, with the current one bracketed
    pub fn context_snippet(&self, radius: usize) -> String {
        let start = self.position.saturating_sub(radius);
        let end = (self.position + radius + 1).min(self.pieces.len());
        (start..end)
            .map(|i| {
                if i == self.position {
                    format!("[{}]", self.pieces[i])
                } else {
                    self.pieces[i].clone()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
