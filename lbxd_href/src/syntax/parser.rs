//! Route grammar: dispatches on the first token and consumes the rest
//!
//! Dispatch order is static pages, media pages, role pages, year in review,
//! then the user fallback. Each branch checks its required positional tokens
//! before moving the cursor and hands whatever is left to the filter grammar.

use chrono::Datelike;

use crate::config::compile_time::grammar::FIRST_YEAR_IN_REVIEW;
use crate::grammar::builders::{parse_filters, parse_popular};
use crate::grammar::filters::FilterBag;
use crate::grammar::keywords::*;
use crate::grammar::route::*;
use crate::syntax::error::{HrefParseError, HrefResult};
use crate::tokens::{tokenize_href, HrefTokens, NormalizedHref};

type ParseResult<T> = Result<T, HrefParseError>;

/// Inputs the grammar needs besides the href itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Upper bound of the year-in-review range
    pub current_year: i32,
}

impl ParseOptions {
    pub fn for_year(current_year: i32) -> Self {
        Self { current_year }
    }
}

impl Default for ParseOptions {
    /// Reads the system clock
    fn default() -> Self {
        Self::for_year(chrono::Utc::now().year())
    }
}

/// Parse a site URL or path into a route descriptor
pub fn parse_href(href: &str) -> HrefResult<Route> {
    parse_href_with(href, &ParseOptions::default())
}

/// Parse with explicit options; deterministic for fixed options
pub fn parse_href_with(href: &str, options: &ParseOptions) -> HrefResult<Route> {
    match tokenize_href(href)? {
        NormalizedHref::Root => Ok(Route::Root),
        NormalizedHref::Path(tokens) => Ok(RouteParser::new(tokens, options).parse()?),
    }
}

/// Parse an already tokenized path
pub fn parse_tokens(tokens: HrefTokens, options: &ParseOptions) -> ParseResult<Route> {
    if tokens.is_empty() {
        return Ok(Route::Root);
    }
    RouteParser::new(tokens, options).parse()
}

struct RouteParser<'a> {
    tokens: HrefTokens,
    options: &'a ParseOptions,
}

impl<'a> RouteParser<'a> {
    fn new(tokens: HrefTokens, options: &'a ParseOptions) -> Self {
        Self { tokens, options }
    }

    fn parse(mut self) -> ParseResult<Route> {
        let Some(base) = self.tokens.current().map(str::to_string) else {
            return Ok(Route::Root);
        };

        if let Some(page) = OtherPageSlug::parse(&base) {
            self.tokens.advance_by(1);
            return Ok(Route::OtherPage(OtherPageRoute {
                page,
                remaining_href: self.tokens.remaining_href(),
            }));
        }

        if let Some(media) = MediaPageSlug::parse(&base) {
            return self.parse_media_page(media);
        }

        if let Some(role) = RoleSlug::parse(&base) {
            return self.parse_person(role);
        }

        if let Some(year) = self.year_in_review(&base) {
            self.tokens.advance_by(1);
            return Ok(Route::YearInReview(YearInReviewRoute {
                year,
                remaining_href: self.tokens.remaining_href(),
            }));
        }

        self.parse_user(base)
    }

    /// Four ASCII digits inside the supported range
    fn year_in_review(&self, token: &str) -> Option<i32> {
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = token.parse().ok()?;
        (FIRST_YEAR_IN_REVIEW..=self.options.current_year)
            .contains(&year)
            .then_some(year)
    }

    // ========================================================================
    // MEDIA PAGES
    // ========================================================================

    fn parse_media_page(&mut self, media: MediaPageSlug) -> ParseResult<Route> {
        match media {
            MediaPageSlug::Film => self.parse_film(),
            MediaPageSlug::Films => {
                self.tokens.advance_by(1);
                Ok(Route::Films(FilmsRoute {
                    filters: self.filters()?,
                }))
            }
            MediaPageSlug::Lists => {
                self.tokens.advance_by(1);
                Ok(Route::Lists(ListsRoute {
                    filters: self.filters()?,
                }))
            }
            MediaPageSlug::Members => self.parse_members(),
            MediaPageSlug::Reviewers => Ok(Route::Reviewers(self.parse_popular_page()?)),
            MediaPageSlug::Reviews => Ok(Route::Reviews(self.parse_popular_page()?)),
            MediaPageSlug::Tag => {
                let (tag_slug, tags_type, filters) = self.parse_tag_body()?;
                Ok(Route::Tag(TagRoute {
                    tag_slug,
                    tags_type,
                    filters,
                }))
            }
            MediaPageSlug::Search => self.parse_search(),
        }
    }

    /// film/<slug>[/<subroute>[/filters]]
    fn parse_film(&mut self) -> ParseResult<Route> {
        let film_slug = self.required(1, "Missing film slug")?;
        self.tokens.advance_by(2);

        let Some(token) = self.tokens.current() else {
            return Ok(Route::Film(FilmRoute {
                film_slug,
                subroute: None,
                filters: FilterBag::default(),
            }));
        };

        let subroute =
            FilmSubroute::parse(token).ok_or_else(|| self.tokens.error(0, "Unknown film subroute"))?;
        self.tokens.advance_by(1);

        Ok(Route::Film(FilmRoute {
            film_slug,
            subroute: Some(subroute),
            filters: self.filters()?,
        }))
    }

    /// members[/hq[/<org-type>]][/filters]
    fn parse_members(&mut self) -> ParseResult<Route> {
        self.tokens.advance_by(1);

        let hq = if self.tokens.current() == Some(HQ) {
            self.tokens.advance_by(1);
            let organization_type = match self.tokens.current() {
                Some(token) if !is_filter_key(token) => {
                    let org = OrganizationType::parse(token).ok_or_else(|| {
                        self.tokens.error(0, "Unknown members organization type")
                    })?;
                    self.tokens.advance_by(1);
                    Some(org)
                }
                _ => None,
            };
            Some(HqMembers { organization_type })
        } else {
            None
        };

        Ok(Route::Members(MembersRoute {
            hq,
            filters: self.filters()?,
        }))
    }

    /// (reviewers|reviews)/popular…[/filters]
    fn parse_popular_page(&mut self) -> ParseResult<PopularRoute> {
        if self.tokens.peek_ahead(1) != Some(POPULAR) {
            return Err(self.tokens.error(1, "Missing subroute"));
        }
        self.tokens.advance_by(1);
        let popular = parse_popular(&mut self.tokens)?;

        Ok(PopularRoute {
            popular,
            filters: self.filters()?,
        })
    }

    /// search[/<type>][/<query>]
    fn parse_search(&mut self) -> ParseResult<Route> {
        self.tokens.advance_by(1);

        let route = match self.tokens.remaining_count() {
            0 => SearchRoute::default(),
            1 => SearchRoute {
                search_type: None,
                query: self.tokens.current().map(str::to_string),
            },
            2 => {
                let search_type = self
                    .tokens
                    .current()
                    .and_then(SearchType::parse)
                    .ok_or_else(|| self.tokens.error(0, "Unknown search type"))?;
                SearchRoute {
                    search_type: Some(search_type),
                    query: self.tokens.peek_ahead(1).map(str::to_string),
                }
            }
            _ => return Err(self.tokens.error(1, "Unknown search href")),
        };

        self.tokens.advance_by(self.tokens.remaining_count());
        Ok(Route::Search(route))
    }

    // ========================================================================
    // ROLE PAGES
    // ========================================================================

    /// <role>/<person>[/filters]
    fn parse_person(&mut self, role: RoleSlug) -> ParseResult<Route> {
        let person_slug = self.required(1, "Missing person slug")?;
        self.tokens.advance_by(2);

        Ok(Route::Person(PersonRoute {
            role,
            person_slug,
            filters: self.filters()?,
        }))
    }

    // ========================================================================
    // USER PAGES
    // ========================================================================

    fn parse_user(&mut self, user_slug: String) -> ParseResult<Route> {
        self.tokens.advance_by(1);

        let page = match self.tokens.current() {
            None => UserPage::Root,
            Some(token) => {
                let subroute = UserSubroute::parse(token)
                    .ok_or_else(|| self.tokens.error(0, "Unknown user subroute"))?;
                self.parse_user_page(subroute)?
            }
        };

        Ok(Route::User(UserRoute { user_slug, page }))
    }

    /// Entered with the cursor on the sub-route token
    fn parse_user_page(&mut self, subroute: UserSubroute) -> ParseResult<UserPage> {
        match subroute {
            UserSubroute::Films => {
                self.tokens.advance_by(1);
                let subroute = self.optional(UserFilmsSubroute::parse);
                Ok(UserPage::Films(UserFilmsRoute {
                    subroute,
                    filters: self.filters()?,
                }))
            }
            UserSubroute::Film => self.parse_user_film(),
            UserSubroute::Activity => self.parse_user_activity(),
            UserSubroute::List => {
                let list_slug = self.required(1, "Missing list slug")?;
                self.tokens.advance_by(2);
                let detail = self.optional(|token| (token == DETAIL).then_some(())).is_some();
                Ok(UserPage::List(UserListRoute {
                    list_slug,
                    detail,
                    filters: self.filters()?,
                }))
            }
            UserSubroute::Likes => self.parse_user_likes(),
            UserSubroute::Tags => {
                self.tokens.advance_by(1);
                let tags_type = self.optional(TagsType::parse);
                Ok(UserPage::Tags(UserTagsRoute {
                    tags_type,
                    filters: self.filters()?,
                }))
            }
            UserSubroute::Tag => Ok(UserPage::Tag(self.parse_user_tag()?)),
            UserSubroute::Stories => Ok(UserPage::Stories(self.parse_user_collection()?)),
            UserSubroute::Watchlist => Ok(UserPage::Watchlist(self.parse_user_collection()?)),
            UserSubroute::Lists => Ok(UserPage::Lists(self.parse_user_collection()?)),
            UserSubroute::Followers => Ok(UserPage::Followers(self.parse_user_collection()?)),
            UserSubroute::Following => Ok(UserPage::Following(self.parse_user_collection()?)),
            UserSubroute::Stats => {
                self.tokens.advance_by(1);
                self.expect_end("Unknown stats subroute")?;
                Ok(UserPage::Stats)
            }
            UserSubroute::Friends => self.parse_friends(),
        }
    }

    /// activity[/following]
    fn parse_user_activity(&mut self) -> ParseResult<UserPage> {
        self.tokens.advance_by(1);

        let activity_type = match self.tokens.current() {
            None => None,
            Some(token) => {
                let activity = UserActivityType::parse(token)
                    .ok_or_else(|| self.tokens.error(0, "Unknown user activity route"))?;
                self.tokens.advance_by(1);
                Some(activity)
            }
        };
        self.expect_end("Unknown user activity subroute")?;

        Ok(UserPage::Activity(UserActivityRoute { activity_type }))
    }

    /// likes[/films|reviews|lists[/filters]]
    fn parse_user_likes(&mut self) -> ParseResult<UserPage> {
        self.tokens.advance_by(1);

        let Some(token) = self.tokens.current() else {
            return Ok(UserPage::Likes(UserLikesRoute::default()));
        };

        let likes_type = UserLikesType::parse(token)
            .ok_or_else(|| self.tokens.error(0, "Unknown likes subroute slug"))?;
        self.tokens.advance_by(1);

        Ok(UserPage::Likes(UserLikesRoute {
            likes_type: Some(likes_type),
            filters: self.filters()?,
        }))
    }

    /// tag/<slug>[/<type>][/filters], plain or friends-scoped
    fn parse_user_tag(&mut self) -> ParseResult<UserTagRoute> {
        let (tag_slug, tags_type, filters) = self.parse_tag_body()?;
        Ok(UserTagRoute {
            tag_slug,
            tags_type,
            filters,
        })
    }

    fn parse_user_collection(&mut self) -> ParseResult<UserCollectionRoute> {
        self.tokens.advance_by(1);
        Ok(UserCollectionRoute {
            filters: self.filters()?,
        })
    }

    /// friends/(tag|film)/…
    fn parse_friends(&mut self) -> ParseResult<UserPage> {
        let subroute = self
            .tokens
            .peek_ahead(1)
            .and_then(FriendsSubroute::parse)
            .ok_or_else(|| self.tokens.error(1, "Unknown user friends subroute"))?;
        self.tokens.advance_by(1);

        match subroute {
            FriendsSubroute::Tag => Ok(UserPage::FriendsTag(self.parse_user_tag()?)),
            FriendsSubroute::Film => {
                let film_slug = self.required(1, "Missing film slug")?;
                self.tokens.advance_by(2);
                let subroute = self.optional(FriendsFilmSubroute::parse);
                Ok(UserPage::FriendsFilm(FriendsFilmRoute {
                    film_slug,
                    subroute,
                    filters: self.filters()?,
                }))
            }
        }
    }

    /// film/<slug>[/<subroute> | /likes[/<type>] | /<viewing-id>[/likes]][/filters]
    fn parse_user_film(&mut self) -> ParseResult<UserPage> {
        let film_slug = self.required(1, "Missing film slug")?;
        self.tokens.advance_by(2);

        let view = match self.tokens.current() {
            None => UserFilmView::Overview,
            Some(LIKES) => match self.tokens.peek_ahead(1) {
                None => {
                    self.tokens.advance_by(1);
                    UserFilmView::Likes
                }
                Some(token) => {
                    let likes_type = UserFilmLikesType::parse(token)
                        .ok_or_else(|| self.tokens.error(1, "Unknown likes type"))?;
                    self.tokens.advance_by(2);
                    UserFilmView::LikesOf(likes_type)
                }
            },
            Some(token) => {
                if let Some(subroute) = UserFilmSubroute::parse(token) {
                    self.tokens.advance_by(1);
                    UserFilmView::Subroute(subroute)
                } else if let Some(viewing_id) = parse_viewing_id(token) {
                    self.tokens.advance_by(1);
                    return self.parse_viewing(film_slug, viewing_id);
                } else {
                    UserFilmView::Overview
                }
            }
        };

        Ok(UserPage::Film(UserFilmRoute {
            film_slug,
            view,
            filters: self.filters()?,
        }))
    }

    /// <viewing-id>[/likes]; nothing may follow
    fn parse_viewing(&mut self, film_slug: String, viewing_id: u64) -> ParseResult<UserPage> {
        let subroute = match self.tokens.current() {
            None => None,
            Some(token) => {
                let subroute = ViewingSubroute::parse(token)
                    .ok_or_else(|| self.tokens.error(0, "Unknown user film viewing subroute"))?;
                self.tokens.advance_by(1);
                Some(subroute)
            }
        };
        self.expect_end("Unknown user film subroute")?;

        Ok(UserPage::Film(UserFilmRoute {
            film_slug,
            view: UserFilmView::Viewing {
                viewing_id,
                subroute,
            },
            filters: FilterBag::default(),
        }))
    }

    // ========================================================================
    // SHARED PIECES
    // ========================================================================

    /// tag/<slug>[/<type>][/filters], entered on the `tag` token
    fn parse_tag_body(&mut self) -> ParseResult<(String, Option<TagsType>, FilterBag)> {
        let tag_slug = self.required(1, "Missing tag slug")?;
        self.tokens.advance_by(2);
        let tags_type = self.optional(TagsType::parse);
        Ok((tag_slug, tags_type, self.filters()?))
    }

    /// Token `offset` past the cursor, or a parse error naming it as missing
    fn required(&self, offset: usize, reason: &str) -> ParseResult<String> {
        self.tokens
            .peek_ahead(offset)
            .map(str::to_string)
            .ok_or_else(|| self.tokens.error(offset, reason))
    }

    /// Consume the current token when `matcher` accepts it
    fn optional<T>(&mut self, matcher: impl Fn(&str) -> Option<T>) -> Option<T> {
        let value = self.tokens.current().and_then(matcher)?;
        self.tokens.advance_by(1);
        Some(value)
    }

    fn expect_end(&self, reason: &str) -> ParseResult<()> {
        if self.tokens.is_at_end() {
            Ok(())
        } else {
            Err(self.tokens.error(0, reason))
        }
    }

    fn filters(&mut self) -> ParseResult<FilterBag> {
        parse_filters(&mut self.tokens)
    }
}

/// Decimal digits without leading zeros
fn parse_viewing_id(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::filters::{GenreFilter, PopularFilter, RoleFilter};
    use crate::syntax::error::HrefError;
    use assert_matches::assert_matches;

    const OPTIONS: ParseOptions = ParseOptions { current_year: 2024 };

    fn parse(href: &str) -> Route {
        match parse_href_with(href, &OPTIONS) {
            Ok(route) => route,
            Err(error) => panic!("{href} failed: {error}"),
        }
    }

    fn parse_err(href: &str) -> HrefParseError {
        match parse_href_with(href, &OPTIONS) {
            Err(HrefError::Parse(error)) => error,
            other => panic!("{href}: expected parse error, got {other:?}"),
        }
    }

    fn user_page(href: &str) -> UserPage {
        match parse(href) {
            Route::User(user) => user.page,
            other => panic!("{href}: expected user route, got {other:?}"),
        }
    }

    // === ENTRY ===

    #[test]
    fn test_root_and_malformed() {
        assert_eq!(parse("/"), Route::Root);
        assert_matches!(
            parse_href_with("", &OPTIONS),
            Err(HrefError::MalformedHref { .. })
        );
        assert_matches!(
            parse_href_with("films/", &OPTIONS),
            Err(HrefError::MalformedHref { .. })
        );
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            parse("https://letterboxd.com/film/dune-part-two/"),
            parse("/film/dune-part-two/")
        );
        assert_matches!(
            parse_href_with("https://boxd.it/film/x/", &OPTIONS),
            Err(HrefError::InvalidHost { host }) if host == "boxd.it"
        );
    }

    // === MEDIA PAGES ===

    #[test]
    fn test_film_detail() {
        assert_eq!(
            parse("/film/dune-part-two/"),
            Route::Film(FilmRoute {
                film_slug: "dune-part-two".to_string(),
                subroute: None,
                filters: FilterBag::default(),
            })
        );
    }

    #[test]
    fn test_film_subroute_with_filters() {
        assert_matches!(
            parse("/film/heat-1995/reviews/by/activity/page/2/"),
            Route::Film(FilmRoute { subroute: Some(FilmSubroute::Reviews), filters, .. })
                if filters.by.as_deref() == Some("activity") && filters.page.as_deref() == Some("2")
        );
    }

    #[test]
    fn test_film_missing_slug() {
        let error = parse_err("/film/");
        assert_eq!(error.reason, "Missing film slug");
        assert_eq!((error.index, error.offset), (0, 1));
        assert_eq!(error.failing_position(), 1);
    }

    #[test]
    fn test_film_unknown_subroute() {
        let error = parse_err("/film/heat-1995/by/rating/");
        assert_eq!(error.reason, "Unknown film subroute");
        assert_eq!((error.index, error.offset), (2, 0));
    }

    #[test]
    fn test_films_genre_and_sort() {
        let route = parse("/films/genre/action+-horror/by/rating/");
        let Route::Films(films) = route else {
            panic!("expected films route");
        };
        assert_eq!(
            films.filters.genre,
            Some(GenreFilter::new(["action", "-horror"]))
        );
        assert_eq!(films.filters.by.as_deref(), Some("rating"));
    }

    #[test]
    fn test_lists() {
        assert_matches!(
            parse("/lists/popular/this/week/"),
            Route::Lists(ListsRoute { filters })
                if filters.popular == Some(PopularFilter::This(PopularTimeSpan::Week))
        );
    }

    #[test]
    fn test_members() {
        assert_eq!(parse("/members/"), Route::Members(MembersRoute::default()));

        assert_matches!(
            parse("/members/hq/festivals/by/name/"),
            Route::Members(MembersRoute { hq: Some(HqMembers { organization_type: Some(OrganizationType::Festivals) }), filters })
                if filters.by.as_deref() == Some("name")
        );

        assert_matches!(
            parse("/members/hq/popular/"),
            Route::Members(MembersRoute { hq: Some(HqMembers { organization_type: None }), filters })
                if filters.popular == Some(PopularFilter::Flag)
        );

        assert_matches!(
            parse("/members/popular/this/month/"),
            Route::Members(MembersRoute { hq: None, .. })
        );
    }

    #[test]
    fn test_members_unknown_org_type() {
        let error = parse_err("/members/hq/bakeries/");
        assert_eq!(error.reason, "Unknown members organization type");
        assert_eq!(error.index, 2);
    }

    #[test]
    fn test_reviews_popular_this_week() {
        assert_eq!(
            parse("/reviews/popular/this/week/"),
            Route::Reviews(PopularRoute {
                popular: PopularFilter::This(PopularTimeSpan::Week),
                filters: FilterBag::default(),
            })
        );
    }

    #[test]
    fn test_reviews_invalid_span() {
        let error = parse_err("/reviews/popular/this/day/");
        assert_eq!(error.reason, "Invalid popular time span");
        assert!(error.implicated_pieces().contains(&"day".to_string()));
    }

    #[test]
    fn test_reviewers_requires_popular() {
        assert_matches!(
            parse("/reviewers/popular/with/friends/"),
            Route::Reviewers(PopularRoute { popular: PopularFilter::WithFriends, .. })
        );
        let error = parse_err("/reviewers/");
        assert_eq!(error.reason, "Missing subroute");
        assert_eq!((error.index, error.offset), (0, 1));
        assert_eq!(parse_err("/reviews/by/date/").reason, "Missing subroute");
    }

    #[test]
    fn test_tag() {
        assert_eq!(
            parse("/tag/noir/films/by/release/"),
            Route::Tag(TagRoute {
                tag_slug: "noir".to_string(),
                tags_type: Some(TagsType::Films),
                filters: FilterBag::default().with_value(FilterSlug::By, "release"),
            })
        );
        assert_eq!(parse_err("/tag/").reason, "Missing tag slug");
    }

    #[test]
    fn test_search() {
        assert_eq!(parse("/search/"), Route::Search(SearchRoute::default()));
        assert_eq!(
            parse("/search/blade+runner/"),
            Route::Search(SearchRoute {
                search_type: None,
                query: Some("blade+runner".to_string()),
            })
        );
        assert_eq!(
            parse("/search/cast-crew/villeneuve/"),
            Route::Search(SearchRoute {
                search_type: Some(SearchType::CastCrew),
                query: Some("villeneuve".to_string()),
            })
        );
    }

    #[test]
    fn test_search_errors() {
        let error = parse_err("/search/films/a/b/");
        assert_eq!(error.reason, "Unknown search href");
        assert_eq!((error.index, error.offset), (1, 1));
        assert_eq!(parse_err("/search/movies/dune/").reason, "Unknown search type");
    }

    // === ROLE, YEAR, STATIC ===

    #[test]
    fn test_person_route() {
        assert_eq!(
            parse("/director/denis-villeneuve/decade/2010s/"),
            Route::Person(PersonRoute {
                role: RoleSlug::Director,
                person_slug: "denis-villeneuve".to_string(),
                filters: FilterBag::default().with_value(FilterSlug::Decade, "2010s"),
            })
        );
    }

    #[test]
    fn test_person_route_with_filters() {
        assert_matches!(
            parse("/actor/tilda-swinton/with/director/wes-anderson/by/release-earliest/"),
            Route::Person(PersonRoute { role: RoleSlug::Actor, filters, .. })
                if filters.with == Some(RoleFilter::new("director", "wes-anderson"))
        );
        assert_eq!(parse_err("/composer/").reason, "Missing person slug");
    }

    #[test]
    fn test_year_in_review() {
        assert_eq!(
            parse("/2019/"),
            Route::YearInReview(YearInReviewRoute {
                year: 2019,
                remaining_href: None,
            })
        );
        assert_matches!(
            parse("/2012/lists/"),
            Route::YearInReview(YearInReviewRoute { year: 2012, remaining_href: Some(rest) }) if rest == "lists"
        );
    }

    #[test]
    fn test_year_out_of_range_falls_through_to_user() {
        assert_matches!(
            parse("/1899/"),
            Route::User(UserRoute { user_slug, page: UserPage::Root }) if user_slug == "1899"
        );
        assert_matches!(parse("/2025/"), Route::User(_));
        assert_matches!(
            parse_href_with("/2025/", &ParseOptions::for_year(2025)),
            Ok(Route::YearInReview(_))
        );
    }

    #[test]
    fn test_other_pages_pass_through() {
        assert_eq!(
            parse("/journal/"),
            Route::OtherPage(OtherPageRoute {
                page: OtherPageSlug::Journal,
                remaining_href: None,
            })
        );
        assert_eq!(
            parse("/showdown/best-heist-films/anything/goes/"),
            Route::OtherPage(OtherPageRoute {
                page: OtherPageSlug::Showdown,
                remaining_href: Some("best-heist-films/anything/goes".to_string()),
            })
        );
    }

    // === USER PAGES ===

    #[test]
    fn test_user_root() {
        assert_eq!(
            parse("/someuser/"),
            Route::User(UserRoute {
                user_slug: "someuser".to_string(),
                page: UserPage::Root,
            })
        );
    }

    #[test]
    fn test_user_films() {
        assert_matches!(
            user_page("/someuser/films/diary/for/2023/"),
            UserPage::Films(UserFilmsRoute { subroute: Some(UserFilmsSubroute::Diary), filters })
                if filters.for_value.as_deref() == Some("2023")
        );
        assert_matches!(
            user_page("/someuser/films/rated/5/"),
            UserPage::Films(UserFilmsRoute { subroute: None, .. })
        );
    }

    #[test]
    fn test_user_activity() {
        assert_eq!(
            user_page("/someuser/activity/"),
            UserPage::Activity(UserActivityRoute::default())
        );
        assert_eq!(
            user_page("/someuser/activity/following/"),
            UserPage::Activity(UserActivityRoute {
                activity_type: Some(UserActivityType::Following),
            })
        );
        assert_eq!(
            parse_err("/someuser/activity/everyone/").reason,
            "Unknown user activity route"
        );
        assert_eq!(
            parse_err("/someuser/activity/following/more/").reason,
            "Unknown user activity subroute"
        );
    }

    #[test]
    fn test_user_list() {
        assert_matches!(
            user_page("/someuser/list/heist-classics/detail/by/rating/"),
            UserPage::List(UserListRoute { list_slug, detail: true, filters })
                if list_slug == "heist-classics" && filters.by.as_deref() == Some("rating")
        );
        let error = parse_err("/someuser/list/");
        assert_eq!(error.reason, "Missing list slug");
        assert_eq!((error.index, error.offset), (1, 1));
    }

    #[test]
    fn test_user_likes() {
        assert_eq!(
            user_page("/someuser/likes/"),
            UserPage::Likes(UserLikesRoute::default())
        );
        assert_matches!(
            user_page("/someuser/likes/films/page/2/"),
            UserPage::Likes(UserLikesRoute { likes_type: Some(UserLikesType::Films), .. })
        );
        assert_eq!(
            parse_err("/someuser/likes/stories/").reason,
            "Unknown likes subroute slug"
        );
    }

    #[test]
    fn test_user_tags_and_collections() {
        assert_matches!(
            user_page("/someuser/tags/diary/"),
            UserPage::Tags(UserTagsRoute { tags_type: Some(TagsType::Diary), .. })
        );
        assert_matches!(user_page("/someuser/watchlist/genre/drama/"), UserPage::Watchlist(_));
        assert_matches!(user_page("/someuser/stories/"), UserPage::Stories(_));
        assert_matches!(user_page("/someuser/lists/by/updated/"), UserPage::Lists(_));
        assert_matches!(user_page("/someuser/followers/page/3/"), UserPage::Followers(_));
        assert_matches!(user_page("/someuser/following/"), UserPage::Following(_));
    }

    #[test]
    fn test_user_stats() {
        assert_eq!(user_page("/someuser/stats/"), UserPage::Stats);
        assert_eq!(
            parse_err("/someuser/stats/2024/").reason,
            "Unknown stats subroute"
        );
    }

    #[test]
    fn test_user_tag() {
        assert_eq!(
            user_page("/someuser/tag/noir/lists/"),
            UserPage::Tag(UserTagRoute {
                tag_slug: "noir".to_string(),
                tags_type: Some(TagsType::Lists),
                filters: FilterBag::default(),
            })
        );
    }

    #[test]
    fn test_friends_tag() {
        assert_eq!(
            user_page("/someuser/friends/tag/noir/films/"),
            UserPage::FriendsTag(UserTagRoute {
                tag_slug: "noir".to_string(),
                tags_type: Some(TagsType::Films),
                filters: FilterBag::default(),
            })
        );
        assert_eq!(parse_err("/someuser/friends/tag/").reason, "Missing tag slug");
    }

    #[test]
    fn test_friends_film() {
        assert_matches!(
            user_page("/someuser/friends/film/heat-1995/reviews/by/activity/"),
            UserPage::FriendsFilm(FriendsFilmRoute { subroute: Some(FriendsFilmSubroute::Reviews), .. })
        );
        assert_matches!(
            user_page("/someuser/friends/film/heat-1995/rated/4/"),
            UserPage::FriendsFilm(FriendsFilmRoute { subroute: None, filters, .. })
                if filters.rated.as_deref() == Some("4")
        );
        // Plain-only sub-routes are rejected in the friends scope
        assert_eq!(
            parse_err("/someuser/friends/film/heat-1995/diary/").reason,
            "Unknown href filter"
        );
        let error = parse_err("/someuser/friends/watchlist/");
        assert_eq!(error.reason, "Unknown user friends subroute");
    }

    #[test]
    fn test_user_film_views() {
        assert_matches!(
            user_page("/someuser/film/heat-1995/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Overview, .. })
        );
        assert_matches!(
            user_page("/someuser/film/heat-1995/diary/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Subroute(UserFilmSubroute::Diary), .. })
        );
        assert_matches!(
            user_page("/someuser/film/heat-1995/likes/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Likes, .. })
        );
        assert_matches!(
            user_page("/someuser/film/heat-1995/likes/lists/page/2/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::LikesOf(UserFilmLikesType::Lists), filters, .. })
                if filters.page.as_deref() == Some("2")
        );
        assert_eq!(
            parse_err("/someuser/film/heat-1995/likes/films/").reason,
            "Unknown likes type"
        );
    }

    #[test]
    fn test_user_film_viewing() {
        assert_eq!(
            user_page("/someuser/film/heat-1995/2/likes/"),
            UserPage::Film(UserFilmRoute {
                film_slug: "heat-1995".to_string(),
                view: UserFilmView::Viewing {
                    viewing_id: 2,
                    subroute: Some(ViewingSubroute::Likes),
                },
                filters: FilterBag::default(),
            })
        );
        assert_matches!(
            user_page("/someuser/film/heat-1995/3/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Viewing { viewing_id: 3, subroute: None }, .. })
        );
        assert_eq!(
            parse_err("/someuser/film/heat-1995/2/diary/").reason,
            "Unknown user film viewing subroute"
        );
        assert_eq!(
            parse_err("/someuser/film/heat-1995/2/likes/page/2/").reason,
            "Unknown user film subroute"
        );
    }

    #[test]
    fn test_viewing_id_with_leading_zero_is_not_a_viewing() {
        let error = parse_err("/someuser/film/heat-1995/007/");
        assert_eq!(error.reason, "Unknown href filter");
        assert_eq!((error.index, error.offset), (3, 0));

        assert_matches!(
            user_page("/someuser/film/heat-1995/0/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Viewing { viewing_id: 0, .. }, .. })
        );
    }

    #[test]
    fn test_user_film_filters_and_missing_slug() {
        assert_matches!(
            user_page("/someuser/film/heat-1995/by/date/"),
            UserPage::Film(UserFilmRoute { view: UserFilmView::Overview, filters, .. })
                if filters.by.as_deref() == Some("date")
        );
        let error = parse_err("/someuser/film/");
        assert_eq!(error.reason, "Missing film slug");
        assert_eq!(error.failing_position(), 2);
    }

    #[test]
    fn test_unknown_user_subroute() {
        let error = parse_err("/someuser/diaryy/");
        assert_eq!(error.reason, "Unknown user subroute");
        assert_eq!((error.index, error.offset), (1, 0));
    }

    #[test]
    fn test_parse_tokens_directly() {
        let tokens = HrefTokens::from_path("films/page/2");
        assert_matches!(parse_tokens(tokens, &OPTIONS), Ok(Route::Films(_)));
        assert_eq!(
            parse_tokens(HrefTokens::from_path(""), &OPTIONS),
            Ok(Route::Root)
        );
    }
}
