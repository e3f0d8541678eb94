//! Advisory checks of filter values against the site's vocabularies
//!
//! The grammar treats values as opaque. These checks only flag values the
//! site is not known to accept; they never reject a route.

use crate::grammar::filters::FilterBag;
use crate::grammar::keywords::FilterSlug;
use crate::logging::codes::{self, Code};
use serde::Serialize;

const SORT_KEYS: &[&str] = &[
    "name",
    "best-match",
    "popular",
    "shuffle",
    "activity",
    "diary-count",
    "review-count",
    "added",
    "added-earliest",
    "release",
    "release-earliest",
    "rating",
    "rating-lowest",
    "shortest",
    "longest",
    "owner-diary",
    "owner-diary-earliest",
    "owner-rating",
    "owner-rating-lowest",
    "date",
    "date-earliest",
    "rated-date",
    "rated-date-earliest",
    "entry-rating",
    "entry-rating-lowest",
    "member-rating",
    "member-rating-lowest",
    "newest",
    "oldest",
    "updated",
    "updated-oldest",
    "week",
    "month",
    "year",
    "whenJoined",
    "billing",
    "title",
    "published",
    "published-oldest",
];

const RATINGS: &[&str] = &[
    "none", "0.5", "1", "1.5", "2", "2.5", "3", "3.5", "4", "4.5", "5",
];

const GENRES: &[&str] = &[
    "action",
    "adventure",
    "animation",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "family",
    "fantasy",
    "history",
    "horror",
    "music",
    "mystery",
    "romance",
    "science-fiction",
    "thriller",
    "tv-movie",
    "war",
    "western",
];

const SIZES: &[&str] = &["large"];

const FIRST_DECADE: u32 = 1870;
const LAST_DECADE: u32 = 2020;

/// One value outside its known vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub key: FilterSlug,
    pub value: String,
    pub message: String,
}

impl LintWarning {
    fn new(key: FilterSlug, value: &str, expected: &str) -> Self {
        Self {
            key,
            value: value.to_string(),
            message: format!("Unknown {} value '{}', expected {}", key, value, expected),
        }
    }

    pub fn code(&self) -> Code {
        codes::lint::UNKNOWN_FILTER_VALUE
    }
}

/// Check every vocabulary-bound filter value in the bag
pub fn lint_filters(filters: &FilterBag) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if let Some(value) = filters.value(FilterSlug::By) {
        if !SORT_KEYS.contains(&value) {
            warnings.push(LintWarning::new(FilterSlug::By, value, "a sort key"));
        }
    }

    if let Some(value) = filters.value(FilterSlug::Rated) {
        if !RATINGS.contains(&value) {
            warnings.push(LintWarning::new(
                FilterSlug::Rated,
                value,
                "none or 0.5 to 5 in half steps",
            ));
        }
    }

    if let Some(value) = filters.value(FilterSlug::Decade) {
        if !is_known_decade(value) {
            warnings.push(LintWarning::new(
                FilterSlug::Decade,
                value,
                "a decade from 1870s to 2020s",
            ));
        }
    }

    if let Some(genre) = &filters.genre {
        for slug in genre.slugs() {
            let bare = slug.trim_start_matches(['+', '-']);
            if !GENRES.contains(&bare) {
                warnings.push(LintWarning::new(FilterSlug::Genre, slug, "a genre slug"));
            }
        }
    }

    if let Some(value) = filters.value(FilterSlug::Size) {
        if !SIZES.contains(&value) {
            warnings.push(LintWarning::new(FilterSlug::Size, value, "large"));
        }
    }

    if let Some(value) = filters.value(FilterSlug::Page) {
        if !matches!(value.parse::<u32>(), Ok(page) if page > 0) {
            warnings.push(LintWarning::new(
                FilterSlug::Page,
                value,
                "a positive integer",
            ));
        }
    }

    warnings
}

fn is_known_decade(value: &str) -> bool {
    let Some(digits) = value.strip_suffix('s') else {
        return false;
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match digits.parse::<u32>() {
        Ok(year) => year % 10 == 0 && (FIRST_DECADE..=LAST_DECADE).contains(&year),
        Err(_) => false,
    }
}
