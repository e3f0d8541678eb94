//! Slug vocabularies of the href grammar
//!
//! Every structural token the grammar matches on is a variant of one of the
//! closed enums below. Matching is exact and case-sensitive.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed slug enum with `as_str`, `parse`, `ALL` and `Display`.
macro_rules! slug_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $slug:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $slug)] $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            /// Parse from a raw path token (exact match, case-sensitive)
            pub fn parse(token: &str) -> Option<Self> {
                match token {
                    $($slug => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// === LITERAL TOKENS ===

pub const HQ: &str = "hq";
pub const POPULAR: &str = "popular";
pub const THIS: &str = "this";
pub const WITH: &str = "with";
pub const FRIENDS: &str = "friends";
pub const DETAIL: &str = "detail";
pub const LIKES: &str = "likes";

// === FILTER KEYS ===

slug_enum! {
    /// Filter keys, declared in canonical serialization order
    FilterSlug {
        Popular => "popular",
        For => "for",
        Rated => "rated",
        Upcoming => "upcoming",
        Decade => "decade",
        Year => "year",
        Like => "like",
        In => "in",
        Genre => "genre",
        Nanogenre => "nanogenre",
        Theme => "theme",
        MiniTheme => "mini-theme",
        On => "on",
        With => "with",
        By => "by",
        Size => "size",
        Page => "page",
    }
}

impl FilterSlug {
    /// Field name the value is recorded under; differs from the key only for `mini-theme`
    pub const fn field_name(self) -> &'static str {
        match self {
            FilterSlug::MiniTheme => "minitheme",
            other => other.as_str(),
        }
    }

    /// Keys whose value is exactly one opaque token
    pub const fn takes_single_value(self) -> bool {
        !matches!(
            self,
            FilterSlug::Popular | FilterSlug::Upcoming | FilterSlug::Genre | FilterSlug::With
        )
    }
}

slug_enum! {
    /// Span paired with `popular/this/…`
    PopularTimeSpan {
        Year => "year",
        Month => "month",
        Week => "week",
    }
}

// === TOP-LEVEL PAGES ===

slug_enum! {
    /// Structured media pages
    MediaPageSlug {
        Film => "film",
        Films => "films",
        Lists => "lists",
        Members => "members",
        Reviewers => "reviewers",
        Tag => "tag",
        Reviews => "reviews",
        Search => "search",
    }
}

slug_enum! {
    /// Static pages whose remaining path is passed through untouched
    OtherPageSlug {
        Showdown => "showdown",
        Journal => "journal",
        About => "about",
        GiftGuide => "gift-guide",
        Legal => "legal",
        Welcome => "welcome",
        Apps => "apps",
        Pro => "pro",
        Contact => "contact",
        ApiBeta => "api-beta",
        Api => "api",
    }
}

slug_enum! {
    /// Filmography roles, used both as a top-level page and in `with/<role>/<person>`
    RoleSlug {
        Actor => "actor",
        AdditionalDirecting => "additional-directing",
        AdditionalPhotography => "additional-photography",
        ArtDirection => "art-direction",
        AssistantDirector => "assistant-director",
        CameraOperator => "camera-operator",
        Casting => "casting",
        Choreography => "choreography",
        Cinematography => "cinematography",
        CoDirector => "co-director",
        Composer => "composer",
        CostumeDesign => "costume-design",
        Director => "director",
        Editor => "editor",
        ExecutiveProducer => "executive-producer",
        Hairstyling => "hairstyling",
        Lighting => "lighting",
        Makeup => "makeup",
        OriginalWriter => "original-writer",
        Producer => "producer",
        ProductionDesign => "production-design",
        SetDecoration => "set-decoration",
        Songs => "songs",
        Sound => "sound",
        SpecialEffects => "special-effects",
        Stunts => "stunts",
        Studio => "studio",
        Story => "story",
        TitleDesign => "title-design",
        VisualEffects => "visual-effects",
        Writer => "writer",
    }
}

// === MEDIA PAGE SUB-ROUTES ===

slug_enum! {
    FilmSubroute {
        Similar => "similar",
        Themes => "themes",
        Nanogenres => "nanogenres",
        Crew => "crew",
        Details => "details",
        Genres => "genres",
        Releases => "releases",
        Members => "members",
        Fans => "fans",
        Likes => "likes",
        Reviews => "reviews",
        Lists => "lists",
    }
}

slug_enum! {
    /// Content type shown on a tag page
    TagsType {
        Films => "films",
        Diary => "diary",
        Reviews => "reviews",
        Lists => "lists",
    }
}

slug_enum! {
    SearchType {
        Films => "films",
        Reviews => "reviews",
        Lists => "lists",
        OriginalLists => "original-lists",
        Stories => "stories",
        CastCrew => "cast-crew",
        Members => "members",
        Tags => "tags",
        Articles => "articles",
        Episodes => "episodes",
        FullText => "full-text",
    }
}

slug_enum! {
    /// Organization types listed under `members/hq`
    OrganizationType {
        Societies => "societies",
        Educators => "educators",
        Exhibitors => "exhibitors",
        Festivals => "festivals",
        Films => "films",
        Genres => "genres",
        Associations => "associations",
        Publishers => "publishers",
        Platforms => "platforms",
        Podcasts => "podcasts",
        Streamers => "streamers",
        Studios => "studios",
    }
}

// === USER SUB-ROUTES ===

slug_enum! {
    /// Token 1 of a user-scoped route
    UserSubroute {
        Films => "films",
        Film => "film",
        Activity => "activity",
        List => "list",
        Likes => "likes",
        Tags => "tags",
        Tag => "tag",
        Stories => "stories",
        Watchlist => "watchlist",
        Lists => "lists",
        Followers => "followers",
        Following => "following",
        Stats => "stats",
        Friends => "friends",
    }
}

slug_enum! {
    UserFilmsSubroute {
        Diary => "diary",
        Reviews => "reviews",
    }
}

slug_enum! {
    UserActivityType {
        Following => "following",
    }
}

slug_enum! {
    UserLikesType {
        Films => "films",
        Reviews => "reviews",
        Lists => "lists",
    }
}

slug_enum! {
    /// Named sub-routes of a user's own film page (`likes` is handled separately)
    UserFilmSubroute {
        Activity => "activity",
        Diary => "diary",
        Reviews => "reviews",
        Lists => "lists",
    }
}

slug_enum! {
    /// What follows `<user>/film/<slug>/likes`
    UserFilmLikesType {
        Reviews => "reviews",
        Lists => "lists",
    }
}

slug_enum! {
    /// Sub-routes of a single viewing (`<user>/film/<slug>/<id>/…`)
    ViewingSubroute {
        Likes => "likes",
    }
}

slug_enum! {
    /// Token 2 of `<user>/friends/…`
    FriendsSubroute {
        Tag => "tag",
        Film => "film",
    }
}

slug_enum! {
    FriendsFilmSubroute {
        Fans => "fans",
        Likes => "likes",
        Reviews => "reviews",
        Lists => "lists",
    }
}

/// Is this token a filter key?
pub fn is_filter_key(token: &str) -> bool {
    FilterSlug::parse(token).is_some()
}

/// Every slug that token 0 can never be a user name for
pub fn reserved_first_tokens() -> Vec<&'static str> {
    OtherPageSlug::ALL
        .iter()
        .map(|s| s.as_str())
        .chain(MediaPageSlug::ALL.iter().map(|s| s.as_str()))
        .chain(RoleSlug::ALL.iter().map(|s| s.as_str()))
        .collect()
}
