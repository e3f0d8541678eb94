//! Filter Bag rendering in canonical key order

use super::TokenWriter;
use crate::grammar::filters::{FilterBag, GenreFilter, PopularFilter};
use crate::grammar::keywords::{FilterSlug, FRIENDS, POPULAR, THIS, WITH};
use crate::syntax::error::{HrefError, HrefResult};

/// Render filters as `/`-joined tokens
pub fn serialize_filters(filters: &FilterBag) -> HrefResult<String> {
    let mut writer = TokenWriter::default();
    write_filters(&mut writer, filters)?;
    Ok(writer.finish())
}

pub(crate) fn write_filters(writer: &mut TokenWriter, filters: &FilterBag) -> HrefResult<()> {
    for key in FilterSlug::ALL {
        match key {
            FilterSlug::Popular => {
                if let Some(popular) = filters.popular {
                    write_popular(writer, popular);
                }
            }
            FilterSlug::Upcoming => {
                if filters.upcoming {
                    writer.keyword(key.as_str());
                }
            }
            FilterSlug::Genre => {
                if let Some(genre) = &filters.genre {
                    writer.keyword(key.as_str());
                    writer.value(&join_genres(genre)?)?;
                }
            }
            FilterSlug::With => {
                if let Some(role) = &filters.with {
                    if writer.ends_with_bare_popular() && role.role_slug == FRIENDS {
                        return Err(HrefError::logic(
                            "role slug 'friends' after a bare popular flag reads as popular/with/friends",
                        ));
                    }
                    writer.keyword(WITH);
                    writer.value(&role.role_slug)?;
                    writer.value(&role.person_slug)?;
                }
            }
            other => {
                if let Some(value) = filters.value(*other) {
                    writer.keyword(other.as_str());
                    writer.value(value)?;
                }
            }
        }
    }
    Ok(())
}

/// Render a popularity window
pub(crate) fn write_popular(writer: &mut TokenWriter, popular: PopularFilter) {
    writer.keyword(POPULAR);
    match popular {
        PopularFilter::Flag => writer.mark_bare_popular(),
        PopularFilter::This(span) => {
            writer.keyword(THIS);
            writer.keyword(span.as_str());
        }
        PopularFilter::WithFriends => {
            writer.keyword(WITH);
            writer.keyword(FRIENDS);
        }
    }
}

/// Re-join a genre list with `+`, dropping any leading `+` from each member
fn join_genres(genre: &GenreFilter) -> HrefResult<String> {
    if genre.is_empty() {
        return Err(HrefError::logic("genre filter has no genres"));
    }

    let members = genre
        .slugs()
        .iter()
        .map(|slug| {
            let slug = slug.trim_start_matches('+');
            if slug.is_empty() || slug.contains('+') {
                Err(HrefError::logic(format!(
                    "genre member '{}' cannot be rendered",
                    slug
                )))
            } else {
                Ok(slug)
            }
        })
        .collect::<HrefResult<Vec<_>>>()?;

    Ok(members.join("+"))
}
