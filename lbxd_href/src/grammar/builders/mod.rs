//! Filter grammar: the trailing modifiers shared by every list-style route

pub mod filters;
pub mod values;

pub use filters::parse_filters;
pub use values::{parse_genre, parse_popular, parse_role, split_genre_list};
