//! Error types for href parsing and rendering
//!
//! Every failure aborts the call and is returned unchanged; nothing here logs.

use crate::logging::{codes, Code};

pub type HrefResult<T> = Result<T, HrefError>;

/// Structural parse error: the token sequence, the cursor position at the
/// time of failure, and how many tokens past the cursor are implicated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse href piece {}: {reason}", implicated_json(.pieces, .index, .offset))]
pub struct HrefParseError {
    pub pieces: Vec<String>,
    pub index: usize,
    pub offset: usize,
    pub reason: String,
}

impl HrefParseError {
    pub fn new(pieces: &[String], index: usize, offset: usize, reason: impl Into<String>) -> Self {
        Self {
            pieces: pieces.to_vec(),
            index,
            offset,
            reason: reason.into(),
        }
    }

    /// Tokens from `index` through `index + offset`, clipped to the sequence
    pub fn implicated_pieces(&self) -> &[String] {
        implicated_slice(&self.pieces, self.index, self.offset)
    }

    /// Position of the last implicated token (may be one past the end for missing tokens)
    pub fn failing_position(&self) -> usize {
        self.index + self.offset
    }
}

fn implicated_slice(pieces: &[String], index: usize, offset: usize) -> &[String] {
    let start = index.min(pieces.len());
    let end = index.saturating_add(offset).saturating_add(1).min(pieces.len());
    &pieces[start..end.max(start)]
}

fn implicated_json(pieces: &[String], index: &usize, offset: &usize) -> String {
    serde_json::to_string(implicated_slice(pieces, *index, *offset))
        .unwrap_or_else(|_| String::from("[]"))
}

/// Every error the parser and serializer can return
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HrefError {
    #[error(transparent)]
    Parse(#[from] HrefParseError),

    #[error("Invalid url host {host}")]
    InvalidHost { host: String },

    #[error("{reason}: {href}")]
    MalformedHref { href: String, reason: String },

    #[error("Logic error: {message}")]
    Logic { message: String },
}

impl HrefError {
    pub fn invalid_host(host: &str) -> Self {
        Self::InvalidHost {
            host: host.to_string(),
        }
    }

    pub fn malformed(href: &str, reason: &str) -> Self {
        Self::MalformedHref {
            href: href.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn logic(message: impl Into<String>) -> Self {
        Self::Logic {
            message: message.into(),
        }
    }

    /// Get error code for the logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::Parse(_) => codes::href::STRUCTURAL_PARSE_ERROR,
            Self::InvalidHost { .. } => codes::href::INVALID_HOST,
            Self::MalformedHref { .. } => codes::href::MALFORMED_HREF,
            Self::Logic { .. } => codes::serializer::LOGIC_ERROR,
        }
    }

    /// Structural details when this is a parse error
    pub fn as_parse_error(&self) -> Option<&HrefParseError> {
        match self {
            Self::Parse(error) => Some(error),
            _ => None,
        }
    }

    /// Logic errors come from caller-built descriptors, never from input text
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Logic { .. })
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_message_quotes_implicated_pieces() {
        let error = HrefParseError::new(&pieces(&["film", "dune", "bogus"]), 2, 0, "Unknown film subroute");
        assert_eq!(
            error.to_string(),
            r#"Failed to parse href piece ["bogus"]: Unknown film subroute"#
        );
    }

    #[test]
    fn test_missing_token_clips_slice() {
        let error = HrefParseError::new(&pieces(&["film"]), 0, 1, "Missing film slug");
        assert_eq!(error.implicated_pieces(), &["film".to_string()]);
        assert_eq!(error.failing_position(), 1);
        assert_eq!(
            error.to_string(),
            r#"Failed to parse href piece ["film"]: Missing film slug"#
        );
    }

    #[test]
    fn test_index_past_end_renders_empty_slice() {
        let error = HrefParseError::new(&pieces(&["a"]), 3, 0, "x");
        assert!(error.implicated_pieces().is_empty());
        assert!(error.to_string().contains("[]"));
    }

    #[test]
    fn test_error_codes() {
        let parse: HrefError = HrefParseError::new(&[], 0, 0, "x").into();
        assert_eq!(parse.error_code(), codes::href::STRUCTURAL_PARSE_ERROR);
        assert!(parse.as_parse_error().is_some());
        assert!(parse.is_input_error());

        let host = HrefError::invalid_host("example.com");
        assert_eq!(host.to_string(), "Invalid url host example.com");
        assert_eq!(host.category(), "Href");

        let logic = HrefError::logic("no rule");
        assert!(!logic.is_input_error());
        assert_eq!(logic.error_code(), codes::serializer::LOGIC_ERROR);
    }
}
