//! Route descriptor rendering
//!
//! The inverse of the route and filter grammars. Output has no scheme, host,
//! leading or trailing slash. A descriptor the grammar could not read back
//! yields a logic error instead of a lossy path.

pub mod filters;

pub use filters::serialize_filters;

use crate::config::compile_time::grammar::FIRST_YEAR_IN_REVIEW;
use crate::grammar::filters::FilterBag;
use crate::grammar::keywords::*;
use crate::grammar::route::*;
use crate::syntax::error::{HrefError, HrefResult};
use filters::{write_filters, write_popular};

/// Accumulates path tokens
#[derive(Debug, Default)]
pub(crate) struct TokenWriter {
    tokens: Vec<String>,
    /// Last token written was a `popular` with no window
    bare_popular: bool,
}

impl TokenWriter {
    /// Grammar-defined token, always valid
    pub(crate) fn keyword(&mut self, keyword: &str) {
        self.tokens.push(keyword.to_string());
        self.bare_popular = false;
    }

    pub(crate) fn mark_bare_popular(&mut self) {
        self.bare_popular = true;
    }

    pub(crate) fn ends_with_bare_popular(&self) -> bool {
        self.bare_popular
    }

    /// Caller-supplied token; must be a single non-empty segment
    pub(crate) fn value(&mut self, value: &str) -> HrefResult<()> {
        if value.is_empty() {
            return Err(HrefError::logic("empty path segment"));
        }
        if value.contains('/') {
            return Err(HrefError::logic(format!(
                "value '{}' spans more than one path segment",
                value
            )));
        }
        self.tokens.push(value.to_string());
        self.bare_popular = false;
        Ok(())
    }

    /// Opaque passthrough; may contain `/` but no empty segments
    fn passthrough(&mut self, remaining: &str) -> HrefResult<()> {
        for segment in remaining.split('/') {
            self.value(segment)?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> String {
        self.tokens.join("/")
    }
}

/// Render a route descriptor as `/`-joined tokens
pub fn serialize(route: &Route) -> HrefResult<String> {
    let mut writer = TokenWriter::default();
    write_route(&mut writer, route)?;
    Ok(writer.finish())
}

/// Render as a site-relative href with leading and trailing slash
pub fn to_href(route: &Route) -> HrefResult<String> {
    let path = serialize(route)?;
    if path.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}/", path))
    }
}

fn write_route(writer: &mut TokenWriter, route: &Route) -> HrefResult<()> {
    match route {
        Route::Root => Ok(()),
        Route::Film(film) => {
            writer.keyword(MediaPageSlug::Film.as_str());
            writer.value(&film.film_slug)?;
            match film.subroute {
                Some(subroute) => writer.keyword(subroute.as_str()),
                None => require_no_filters(&film.filters, "film page without a sub-route")?,
            }
            write_filters(writer, &film.filters)
        }
        Route::Films(films) => {
            writer.keyword(MediaPageSlug::Films.as_str());
            write_filters(writer, &films.filters)
        }
        Route::Lists(lists) => {
            writer.keyword(MediaPageSlug::Lists.as_str());
            write_filters(writer, &lists.filters)
        }
        Route::Members(members) => {
            writer.keyword(MediaPageSlug::Members.as_str());
            if let Some(hq) = members.hq {
                writer.keyword(HQ);
                if let Some(organization_type) = hq.organization_type {
                    writer.keyword(organization_type.as_str());
                }
            }
            write_filters(writer, &members.filters)
        }
        Route::Reviewers(page) => write_popular_page(writer, MediaPageSlug::Reviewers, page),
        Route::Reviews(page) => write_popular_page(writer, MediaPageSlug::Reviews, page),
        Route::Tag(tag) => {
            writer.keyword(MediaPageSlug::Tag.as_str());
            write_tag_body(writer, &tag.tag_slug, tag.tags_type, &tag.filters)
        }
        Route::Search(search) => {
            writer.keyword(MediaPageSlug::Search.as_str());
            match (&search.search_type, &search.query) {
                (Some(search_type), Some(query)) => {
                    writer.keyword(search_type.as_str());
                    writer.value(query)
                }
                (None, Some(query)) => writer.value(query),
                (None, None) => Ok(()),
                (Some(_), None) => Err(HrefError::logic("search type without a query")),
            }
        }
        Route::Person(person) => {
            writer.keyword(person.role.as_str());
            writer.value(&person.person_slug)?;
            write_filters(writer, &person.filters)
        }
        Route::YearInReview(review) => {
            if !(FIRST_YEAR_IN_REVIEW..=9999).contains(&review.year) {
                return Err(HrefError::logic(format!(
                    "year {} is outside the year in review range",
                    review.year
                )));
            }
            writer.keyword(&review.year.to_string());
            match &review.remaining_href {
                Some(remaining) => writer.passthrough(remaining),
                None => Ok(()),
            }
        }
        Route::OtherPage(page) => {
            writer.keyword(page.page.as_str());
            match &page.remaining_href {
                Some(remaining) => writer.passthrough(remaining),
                None => Ok(()),
            }
        }
        Route::User(user) => write_user(writer, user),
    }
}

fn write_popular_page(
    writer: &mut TokenWriter,
    base: MediaPageSlug,
    page: &PopularRoute,
) -> HrefResult<()> {
    writer.keyword(base.as_str());
    write_popular(writer, page.popular);
    write_filters(writer, &page.filters)
}

fn write_tag_body(
    writer: &mut TokenWriter,
    tag_slug: &str,
    tags_type: Option<TagsType>,
    filters: &FilterBag,
) -> HrefResult<()> {
    writer.value(tag_slug)?;
    if let Some(tags_type) = tags_type {
        writer.keyword(tags_type.as_str());
    }
    write_filters(writer, filters)
}

fn write_user(writer: &mut TokenWriter, user: &UserRoute) -> HrefResult<()> {
    if reserved_first_tokens().contains(&user.user_slug.as_str()) {
        return Err(HrefError::logic(format!(
            "user slug '{}' collides with a site page",
            user.user_slug
        )));
    }
    if reads_as_year_in_review(&user.user_slug) {
        return Err(HrefError::logic(format!(
            "user slug '{}' reads as a year in review",
            user.user_slug
        )));
    }
    writer.value(&user.user_slug)?;

    match &user.page {
        UserPage::Root => Ok(()),
        UserPage::Films(films) => {
            writer.keyword(UserSubroute::Films.as_str());
            if let Some(subroute) = films.subroute {
                writer.keyword(subroute.as_str());
            }
            write_filters(writer, &films.filters)
        }
        UserPage::Film(film) => write_user_film(writer, film),
        UserPage::FriendsFilm(film) => {
            writer.keyword(UserSubroute::Friends.as_str());
            writer.keyword(FriendsSubroute::Film.as_str());
            writer.value(&film.film_slug)?;
            if let Some(subroute) = film.subroute {
                writer.keyword(subroute.as_str());
            }
            write_filters(writer, &film.filters)
        }
        UserPage::Activity(activity) => {
            writer.keyword(UserSubroute::Activity.as_str());
            if let Some(activity_type) = activity.activity_type {
                writer.keyword(activity_type.as_str());
            }
            Ok(())
        }
        UserPage::List(list) => {
            writer.keyword(UserSubroute::List.as_str());
            writer.value(&list.list_slug)?;
            if list.detail {
                writer.keyword(DETAIL);
            }
            write_filters(writer, &list.filters)
        }
        UserPage::Likes(likes) => {
            writer.keyword(UserSubroute::Likes.as_str());
            match likes.likes_type {
                Some(likes_type) => writer.keyword(likes_type.as_str()),
                None => require_no_filters(&likes.filters, "likes page without a type")?,
            }
            write_filters(writer, &likes.filters)
        }
        UserPage::Tags(tags) => {
            writer.keyword(UserSubroute::Tags.as_str());
            if let Some(tags_type) = tags.tags_type {
                writer.keyword(tags_type.as_str());
            }
            write_filters(writer, &tags.filters)
        }
        UserPage::Tag(tag) => {
            writer.keyword(UserSubroute::Tag.as_str());
            write_tag_body(writer, &tag.tag_slug, tag.tags_type, &tag.filters)
        }
        UserPage::FriendsTag(tag) => {
            writer.keyword(UserSubroute::Friends.as_str());
            writer.keyword(FriendsSubroute::Tag.as_str());
            write_tag_body(writer, &tag.tag_slug, tag.tags_type, &tag.filters)
        }
        UserPage::Stories(page) => write_collection(writer, UserSubroute::Stories, page),
        UserPage::Watchlist(page) => write_collection(writer, UserSubroute::Watchlist, page),
        UserPage::Lists(page) => write_collection(writer, UserSubroute::Lists, page),
        UserPage::Followers(page) => write_collection(writer, UserSubroute::Followers, page),
        UserPage::Following(page) => write_collection(writer, UserSubroute::Following, page),
        UserPage::Stats => {
            writer.keyword(UserSubroute::Stats.as_str());
            Ok(())
        }
    }
}

fn write_user_film(writer: &mut TokenWriter, film: &UserFilmRoute) -> HrefResult<()> {
    writer.keyword(UserSubroute::Film.as_str());
    writer.value(&film.film_slug)?;

    match film.view {
        UserFilmView::Overview => {}
        UserFilmView::Subroute(subroute) => writer.keyword(subroute.as_str()),
        UserFilmView::LikesOf(likes_type) => {
            writer.keyword(LIKES);
            writer.keyword(likes_type.as_str());
        }
        UserFilmView::Likes => {
            require_no_filters(&film.filters, "bare film likes page")?;
            writer.keyword(LIKES);
        }
        UserFilmView::Viewing {
            viewing_id,
            subroute,
        } => {
            require_no_filters(&film.filters, "single viewing page")?;
            writer.keyword(&viewing_id.to_string());
            if let Some(subroute) = subroute {
                writer.keyword(subroute.as_str());
            }
        }
    }

    write_filters(writer, &film.filters)
}

fn write_collection(
    writer: &mut TokenWriter,
    subroute: UserSubroute,
    page: &UserCollectionRoute,
) -> HrefResult<()> {
    writer.keyword(subroute.as_str());
    write_filters(writer, &page.filters)
}

fn require_no_filters(filters: &FilterBag, shape: &str) -> HrefResult<()> {
    if filters.is_empty() {
        Ok(())
    } else {
        Err(HrefError::logic(format!("{} does not accept filters", shape)))
    }
}

/// Any four-digit year from the first review year on; the upper bound moves
/// with the clock, so the whole range is treated as taken
fn reads_as_year_in_review(slug: &str) -> bool {
    slug.len() == 4
        && slug.bytes().all(|b| b.is_ascii_digit())
        && slug
            .parse::<i32>()
            .is_ok_and(|year| year >= FIRST_YEAR_IN_REVIEW)
}
