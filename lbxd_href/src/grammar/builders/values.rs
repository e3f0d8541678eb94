//! Sub-parsers for structured filter values
//!
//! Each function is entered with the cursor on its filter key and leaves the
//! cursor past the last consumed value token. On failure the cursor is not moved.

use crate::grammar::filters::{GenreFilter, PopularFilter, RoleFilter};
use crate::grammar::keywords::{PopularTimeSpan, FRIENDS, THIS, WITH};
use crate::syntax::error::HrefParseError;
use crate::tokens::HrefTokens;

/// popular ::= "popular" [ "this" span | "with" "friends" ]
///
/// `popular/with/<anything but friends>` leaves `with` for the role filter.
pub fn parse_popular(tokens: &mut HrefTokens) -> Result<PopularFilter, HrefParseError> {
    match tokens.peek_ahead(1) {
        Some(THIS) => {
            let span = tokens
                .peek_ahead(2)
                .and_then(PopularTimeSpan::parse)
                .ok_or_else(|| tokens.error(2, "Invalid popular time span"))?;
            tokens.advance_by(3);
            Ok(PopularFilter::This(span))
        }
        Some(WITH) if tokens.peek_ahead(2) == Some(FRIENDS) => {
            tokens.advance_by(3);
            Ok(PopularFilter::WithFriends)
        }
        _ => {
            tokens.advance_by(1);
            Ok(PopularFilter::Flag)
        }
    }
}

/// role ::= "with" role-slug person-slug
pub fn parse_role(tokens: &mut HrefTokens) -> Result<RoleFilter, HrefParseError> {
    let role_slug = tokens
        .peek_ahead(1)
        .ok_or_else(|| tokens.error(1, "Missing role slug"))?;
    let person_slug = tokens
        .peek_ahead(2)
        .ok_or_else(|| tokens.error(2, "Missing person slug for role"))?;
    let role = RoleFilter::new(role_slug, person_slug);
    tokens.advance_by(3);
    Ok(role)
}

/// genre ::= "genre" slug ( "+" slug )*
pub fn parse_genre(tokens: &mut HrefTokens) -> Result<GenreFilter, HrefParseError> {
    let value = tokens
        .peek_ahead(1)
        .ok_or_else(|| tokens.error(1, "Missing value for filter genre"))?;
    let genre = split_genre_list(value).ok_or_else(|| tokens.error(1, "Invalid genre filter"))?;
    tokens.advance_by(2);
    Ok(genre)
}

/// Split one `+`-joined genre token; a single leading `+` is ignored.
/// `None` when any member is empty.
pub fn split_genre_list(value: &str) -> Option<GenreFilter> {
    let value = value.strip_prefix('+').unwrap_or(value);
    if value.split('+').any(str::is_empty) {
        return None;
    }
    Some(GenreFilter::new(value.split('+')))
}
