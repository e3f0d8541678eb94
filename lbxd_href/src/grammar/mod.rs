//! Grammar vocabulary, descriptor types and the filter grammar

pub mod builders;
pub mod filters;
pub mod keywords;
pub mod route;

pub use filters::{FilterBag, GenreFilter, PopularFilter, RoleFilter};
pub use keywords::{is_filter_key, FilterSlug, PopularTimeSpan, RoleSlug};
pub use route::*;

pub use builders::parse_filters;
