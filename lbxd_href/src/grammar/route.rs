//! Route descriptors
//!
//! One variant per route shape the grammar accepts. Each variant carries only
//! the fields meaningful to that shape; list-style shapes carry a `FilterBag`.

use crate::grammar::filters::{FilterBag, PopularFilter};
use crate::grammar::keywords::*;
use serde::{Deserialize, Serialize};

/// Typed result of parsing one href
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "kebab-case")]
pub enum Route {
    /// `/`
    Root,
    Film(FilmRoute),
    Films(FilmsRoute),
    Lists(ListsRoute),
    Members(MembersRoute),
    Reviewers(PopularRoute),
    Tag(TagRoute),
    Reviews(PopularRoute),
    Search(SearchRoute),
    /// `/<role>/<person>/…`
    Person(PersonRoute),
    YearInReview(YearInReviewRoute),
    OtherPage(OtherPageRoute),
    User(UserRoute),
}

/// `film/<slug>[/<subroute>[/filters]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmRoute {
    pub film_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subroute: Option<FilmSubroute>,
    #[serde(default)]
    pub filters: FilterBag,
}

/// `films[/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilmsRoute {
    #[serde(default)]
    pub filters: FilterBag,
}

/// `lists[/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListsRoute {
    #[serde(default)]
    pub filters: FilterBag,
}

/// `members[/hq[/<org-type>]][/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembersRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hq: Option<HqMembers>,
    #[serde(default)]
    pub filters: FilterBag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HqMembers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
}

/// `reviewers/popular…` and `reviews/popular…`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularRoute {
    pub popular: PopularFilter,
    #[serde(default)]
    pub filters: FilterBag,
}

/// `tag/<slug>[/<type>][/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRoute {
    pub tag_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_type: Option<TagsType>,
    #[serde(default)]
    pub filters: FilterBag,
}

/// `search[/<type>][/<query>]`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRoute {
    pub role: RoleSlug,
    pub person_slug: String,
    #[serde(default)]
    pub filters: FilterBag,
}

/// `<yyyy>[/<remaining…>]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInReviewRoute {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_href: Option<String>,
}

/// `<page>[/<remaining…>]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPageRoute {
    pub page: OtherPageSlug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_href: Option<String>,
}

// === USER-SCOPED ROUTES ===

/// `<user>[/<page>…]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoute {
    pub user_slug: String,
    pub page: UserPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum UserPage {
    Root,
    Films(UserFilmsRoute),
    Film(UserFilmRoute),
    FriendsFilm(FriendsFilmRoute),
    Activity(UserActivityRoute),
    List(UserListRoute),
    Likes(UserLikesRoute),
    Tags(UserTagsRoute),
    Tag(UserTagRoute),
    FriendsTag(UserTagRoute),
    Stories(UserCollectionRoute),
    Watchlist(UserCollectionRoute),
    Lists(UserCollectionRoute),
    Followers(UserCollectionRoute),
    Following(UserCollectionRoute),
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserFilmsRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subroute: Option<UserFilmsSubroute>,
    #[serde(default)]
    pub filters: FilterBag,
}

/// `<user>/film/<slug>…`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilmRoute {
    pub film_slug: String,
    pub view: UserFilmView,
    #[serde(default)]
    pub filters: FilterBag,
}

/// What part of a user's film page is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserFilmView {
    /// No sub-route
    Overview,
    /// `activity`, `diary`, `reviews`, `lists`
    Subroute(UserFilmSubroute),
    /// `likes/reviews`, `likes/lists`
    LikesOf(UserFilmLikesType),
    /// Bare trailing `likes`
    Likes,
    /// `<viewing-id>[/likes]`
    Viewing {
        viewing_id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subroute: Option<ViewingSubroute>,
    },
}

/// `<user>/friends/film/<slug>[/<subroute>][/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsFilmRoute {
    pub film_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subroute: Option<FriendsFilmSubroute>,
    #[serde(default)]
    pub filters: FilterBag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserActivityRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<UserActivityType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListRoute {
    pub list_slug: String,
    #[serde(default)]
    pub detail: bool,
    #[serde(default)]
    pub filters: FilterBag,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserLikesRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_type: Option<UserLikesType>,
    #[serde(default)]
    pub filters: FilterBag,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserTagsRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_type: Option<TagsType>,
    #[serde(default)]
    pub filters: FilterBag,
}

/// Plain or friends-scoped `tag/<slug>[/<type>][/filters]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTagRoute {
    pub tag_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_type: Option<TagsType>,
    #[serde(default)]
    pub filters: FilterBag,
}

/// Stories, watchlist, lists, followers and following: filters only
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserCollectionRoute {
    #[serde(default)]
    pub filters: FilterBag,
}

impl Route {
    /// Short kebab-case name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Film(_) => "film",
            Route::Films(_) => "films",
            Route::Lists(_) => "lists",
            Route::Members(_) => "members",
            Route::Reviewers(_) => "reviewers",
            Route::Tag(_) => "tag",
            Route::Reviews(_) => "reviews",
            Route::Search(_) => "search",
            Route::Person(_) => "person",
            Route::YearInReview(_) => "year-in-review",
            Route::OtherPage(_) => "other-page",
            Route::User(user) => user.page.kind(),
        }
    }

    /// Filters attached to the route, if the shape carries any
    pub fn filters(&self) -> Option<&FilterBag> {
        match self {
            Route::Film(r) => Some(&r.filters),
            Route::Films(r) => Some(&r.filters),
            Route::Lists(r) => Some(&r.filters),
            Route::Members(r) => Some(&r.filters),
            Route::Reviewers(r) | Route::Reviews(r) => Some(&r.filters),
            Route::Tag(r) => Some(&r.filters),
            Route::Person(r) => Some(&r.filters),
            Route::User(user) => user.page.filters(),
            Route::Root | Route::Search(_) | Route::YearInReview(_) | Route::OtherPage(_) => None,
        }
    }

    pub fn user_slug(&self) -> Option<&str> {
        match self {
            Route::User(user) => Some(&user.user_slug),
            _ => None,
        }
    }
}

impl UserPage {
    pub fn kind(&self) -> &'static str {
        match self {
            UserPage::Root => "user",
            UserPage::Films(_) => "user-films",
            UserPage::Film(_) => "user-film",
            UserPage::FriendsFilm(_) => "user-friends-film",
            UserPage::Activity(_) => "user-activity",
            UserPage::List(_) => "user-list",
            UserPage::Likes(_) => "user-likes",
            UserPage::Tags(_) => "user-tags",
            UserPage::Tag(_) => "user-tag",
            UserPage::FriendsTag(_) => "user-friends-tag",
            UserPage::Stories(_) => "user-stories",
            UserPage::Watchlist(_) => "user-watchlist",
            UserPage::Lists(_) => "user-lists",
            UserPage::Followers(_) => "user-followers",
            UserPage::Following(_) => "user-following",
            UserPage::Stats => "user-stats",
        }
    }

    pub fn filters(&self) -> Option<&FilterBag> {
        match self {
            UserPage::Films(r) => Some(&r.filters),
            UserPage::Film(r) => Some(&r.filters),
            UserPage::FriendsFilm(r) => Some(&r.filters),
            UserPage::List(r) => Some(&r.filters),
            UserPage::Likes(r) => Some(&r.filters),
            UserPage::Tags(r) => Some(&r.filters),
            UserPage::Tag(r) | UserPage::FriendsTag(r) => Some(&r.filters),
            UserPage::Stories(r)
            | UserPage::Watchlist(r)
            | UserPage::Lists(r)
            | UserPage::Followers(r)
            | UserPage::Following(r) => Some(&r.filters),
            UserPage::Root | UserPage::Activity(_) | UserPage::Stats => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::FilterSlug;

    #[test]
    fn test_route_kind_names() {
        assert_eq!(Route::Root.kind(), "root");
        let user = Route::User(UserRoute {
            user_slug: "someuser".to_string(),
            page: UserPage::Stats,
        });
        assert_eq!(user.kind(), "user-stats");
        assert_eq!(user.user_slug(), Some("someuser"));
    }

    #[test]
    fn test_filters_accessor() {
        let route = Route::Films(FilmsRoute {
            filters: FilterBag::default().with_value(FilterSlug::Page, "2"),
        });
        assert_eq!(
            route.filters().and_then(|f| f.value(FilterSlug::Page)),
            Some("2")
        );
        assert!(Route::Search(SearchRoute::default()).filters().is_none());
    }

    #[test]
    fn test_json_tagging() {
        let route = Route::Film(FilmRoute {
            film_slug: "dune-part-two".to_string(),
            subroute: None,
            filters: FilterBag::default(),
        });
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["route"], "film");
        assert_eq!(json["film_slug"], "dune-part-two");
        assert!(json.get("subroute").is_none());

        let back: Route = serde_json::from_value(json).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn test_user_page_json_tagging() {
        let route = Route::User(UserRoute {
            user_slug: "someuser".to_string(),
            page: UserPage::FriendsTag(UserTagRoute {
                tag_slug: "noir".to_string(),
                tags_type: Some(TagsType::Films),
                filters: FilterBag::default(),
            }),
        });
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["route"], "user");
        assert_eq!(json["page"]["page"], "friends-tag");
        assert_eq!(json["page"]["tags_type"], "films");
    }
}
