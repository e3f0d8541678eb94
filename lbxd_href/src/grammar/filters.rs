//! Filter Bag and the filter value types
//!
//! A `FilterBag` is the optional trailing modifier record attached to every
//! list-style route. All fields are optional; `upcoming` is a bare flag.

use crate::grammar::keywords::{FilterSlug, PopularTimeSpan, RoleSlug};
use serde::{Deserialize, Serialize};

/// Popularity window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "span")]
pub enum PopularFilter {
    /// `popular`
    Flag,
    /// `popular/this/<span>`
    This(PopularTimeSpan),
    /// `popular/with/friends`
    WithFriends,
}

/// `with/<role>/<person>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleFilter {
    pub role_slug: String,
    pub person_slug: String,
}

impl RoleFilter {
    pub fn new(role_slug: impl Into<String>, person_slug: impl Into<String>) -> Self {
        Self {
            role_slug: role_slug.into(),
            person_slug: person_slug.into(),
        }
    }

    /// The role when it is one the site lists
    pub fn known_role(&self) -> Option<RoleSlug> {
        RoleSlug::parse(&self.role_slug)
    }
}

/// `genre/<a>+<b>+-<c>`; a leading `-` marks an excluded genre
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreFilter(pub Vec<String>);

impl GenreFilter {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(slugs.into_iter().map(Into::into).collect())
    }

    pub fn slugs(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|slug| !slug.starts_with('-'))
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|slug| slug.strip_prefix('-'))
    }
}

/// Optional trailing filters of a list-style route
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterBag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<PopularFilter>,
    /// `for/<value>`
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub upcoming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like: Option<String>,
    /// `in/<value>`
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub in_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanogenre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minitheme: Option<String>,
    /// Streaming service slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<RoleFilter>,
    /// Sort key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl FilterBag {
    pub fn is_empty(&self) -> bool {
        *self == FilterBag::default()
    }

    /// Slot for a single-value key; `None` for keys with structured values
    pub fn value_slot_mut(&mut self, key: FilterSlug) -> Option<&mut Option<String>> {
        match key {
            FilterSlug::For => Some(&mut self.for_value),
            FilterSlug::Rated => Some(&mut self.rated),
            FilterSlug::Decade => Some(&mut self.decade),
            FilterSlug::Year => Some(&mut self.year),
            FilterSlug::Like => Some(&mut self.like),
            FilterSlug::In => Some(&mut self.in_value),
            FilterSlug::Nanogenre => Some(&mut self.nanogenre),
            FilterSlug::Theme => Some(&mut self.theme),
            FilterSlug::MiniTheme => Some(&mut self.minitheme),
            FilterSlug::On => Some(&mut self.on),
            FilterSlug::By => Some(&mut self.by),
            FilterSlug::Size => Some(&mut self.size),
            FilterSlug::Page => Some(&mut self.page),
            FilterSlug::Popular | FilterSlug::Upcoming | FilterSlug::Genre | FilterSlug::With => {
                None
            }
        }
    }

    /// Value of a single-value key
    pub fn value(&self, key: FilterSlug) -> Option<&str> {
        let slot = match key {
            FilterSlug::For => &self.for_value,
            FilterSlug::Rated => &self.rated,
            FilterSlug::Decade => &self.decade,
            FilterSlug::Year => &self.year,
            FilterSlug::Like => &self.like,
            FilterSlug::In => &self.in_value,
            FilterSlug::Nanogenre => &self.nanogenre,
            FilterSlug::Theme => &self.theme,
            FilterSlug::MiniTheme => &self.minitheme,
            FilterSlug::On => &self.on,
            FilterSlug::By => &self.by,
            FilterSlug::Size => &self.size,
            FilterSlug::Page => &self.page,
            FilterSlug::Popular | FilterSlug::Upcoming | FilterSlug::Genre | FilterSlug::With => {
                return None
            }
        };
        slot.as_deref()
    }

    /// Keys present in the bag, in canonical order
    pub fn present_keys(&self) -> Vec<FilterSlug> {
        FilterSlug::ALL
            .iter()
            .copied()
            .filter(|key| match key {
                FilterSlug::Popular => self.popular.is_some(),
                FilterSlug::Upcoming => self.upcoming,
                FilterSlug::Genre => self.genre.is_some(),
                FilterSlug::With => self.with.is_some(),
                other => self.value(*other).is_some(),
            })
            .collect()
    }

    // Builder-style setters, mostly for tests and collaborators

    pub fn with_popular(mut self, popular: PopularFilter) -> Self {
        self.popular = Some(popular);
        self
    }

    pub fn with_value(mut self, key: FilterSlug, value: impl Into<String>) -> Self {
        if let Some(slot) = self.value_slot_mut(key) {
            *slot = Some(value.into());
        }
        self
    }

    pub fn with_genre(mut self, genre: GenreFilter) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_role(mut self, role: RoleFilter) -> Self {
        self.with = Some(role);
        self
    }

    pub fn upcoming(mut self) -> Self {
        self.upcoming = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bag() {
        assert!(FilterBag::default().is_empty());
        assert!(FilterBag::default().present_keys().is_empty());
    }

    #[test]
    fn test_present_keys_follow_canonical_order() {
        let bag = FilterBag::default()
            .with_value(FilterSlug::By, "rating")
            .with_genre(GenreFilter::new(["action"]))
            .with_popular(PopularFilter::Flag);
        assert_eq!(
            bag.present_keys(),
            vec![FilterSlug::Popular, FilterSlug::Genre, FilterSlug::By]
        );
    }

    #[test]
    fn test_with_value_ignores_structured_keys() {
        let bag = FilterBag::default().with_value(FilterSlug::Genre, "action");
        assert!(bag.is_empty());
    }

    #[test]
    fn test_genre_members() {
        let genre = GenreFilter::new(["action", "-horror", "drama"]);
        assert_eq!(genre.included().collect::<Vec<_>>(), vec!["action", "drama"]);
        assert_eq!(genre.excluded().collect::<Vec<_>>(), vec!["horror"]);
    }

    #[test]
    fn test_json_field_names() {
        let bag = FilterBag::default()
            .with_value(FilterSlug::MiniTheme, "heists")
            .with_value(FilterSlug::For, "2024")
            .upcoming();
        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(json["minitheme"], "heists");
        assert_eq!(json["for"], "2024");
        assert_eq!(json["upcoming"], true);
        assert!(json.get("page").is_none());
    }

    #[test]
    fn test_known_role() {
        assert_eq!(
            RoleFilter::new("director", "x").known_role(),
            Some(RoleSlug::Director)
        );
        assert_eq!(RoleFilter::new("gaffer", "x").known_role(), None);
    }
}
