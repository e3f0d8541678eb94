//! Trailing filter loop
//!
//! filters ::= ( filter-key value* )*
//!
//! Keys may appear in any order; a repeated key overwrites the earlier value.

use super::values::{parse_genre, parse_popular, parse_role};
use crate::grammar::filters::FilterBag;
use crate::grammar::keywords::FilterSlug;
use crate::syntax::error::HrefParseError;
use crate::tokens::HrefTokens;

/// Consume filters until the token sequence ends.
///
/// Fails on the first token that is not a filter key, or when a key's value
/// is missing.
pub fn parse_filters(tokens: &mut HrefTokens) -> Result<FilterBag, HrefParseError> {
    let mut filters = FilterBag::default();

    while let Some(token) = tokens.current() {
        let Some(key) = FilterSlug::parse(token) else {
            return Err(tokens.error(0, "Unknown href filter"));
        };

        match key {
            FilterSlug::Popular => filters.popular = Some(parse_popular(tokens)?),
            FilterSlug::Upcoming => {
                filters.upcoming = true;
                tokens.advance_by(1);
            }
            FilterSlug::Genre => filters.genre = Some(parse_genre(tokens)?),
            FilterSlug::With => filters.with = Some(parse_role(tokens)?),
            _ => {
                let value = parse_single_value(tokens, key)?;
                if let Some(slot) = filters.value_slot_mut(key) {
                    *slot = Some(value);
                }
            }
        }
    }

    Ok(filters)
}

fn parse_single_value(tokens: &mut HrefTokens, key: FilterSlug) -> Result<String, HrefParseError> {
    let value = tokens
        .peek_ahead(1)
        .map(str::to_string)
        .ok_or_else(|| tokens.error(1, &format!("Missing value for filter {}", key)))?;
    tokens.advance_by(2);
    Ok(value)
}
