//! Absolute URL construction for the site
//!
//! Thin string builders over the configured base URL. Slugs are inserted as
//! given; callers pass values taken from parsed routes.

use crate::config::base_url;
use crate::logging::codes;

/// Absolute URL for an href scraped from a page
///
/// Anything containing `:` is already absolute and returned unchanged. A
/// relative href without a leading slash is joined with `/` and logged.
pub fn url_from_href(href: &str) -> String {
    if href.contains(':') {
        return href.to_string();
    }

    if !href.starts_with('/') {
        crate::log_warning!(
            codes::lint::RELATIVE_HREF,
            &format!("href {} is not an absolute path", href),
            "href" => href
        );
        return format!("{}/{}", base_url(), href);
    }

    format!("{}{}", base_url(), href)
}

pub fn film_page_url(film_slug: &str) -> String {
    format!("{}/film/{}", base_url(), film_slug)
}

/// Poster image page for a film at the given pixel size
pub fn film_poster_url(film_slug: &str, width: u32, height: u32) -> String {
    format!(
        "{}/poster/film/{}/std/{}x{}",
        base_url(),
        film_slug,
        width,
        height
    )
}

pub fn following_activity_url(user_slug: &str) -> String {
    format!("{}/{}/activity/following", base_url(), user_slug)
}

/// Pagination endpoint behind the following-activity page
pub fn following_activity_ajax_url(user_slug: &str, csrf: &str, after: Option<&str>) -> String {
    let mut url = format!(
        "{}/ajax/activity-pagination/{}/following/?__csrf={}",
        base_url(),
        user_slug,
        csrf
    );
    if let Some(after) = after {
        url.push_str("&after=");
        url.push_str(after);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_from_href() {
        assert_eq!(
            url_from_href("/film/heat-1995/"),
            "https://letterboxd.com/film/heat-1995/"
        );
        assert_eq!(
            url_from_href("film/heat-1995/"),
            "https://letterboxd.com/film/heat-1995/"
        );
        assert_eq!(
            url_from_href("https://a.ltrbxd.com/resized/x.jpg"),
            "https://a.ltrbxd.com/resized/x.jpg"
        );
        assert_eq!(url_from_href("mailto:x"), "mailto:x");
    }

    #[test]
    fn test_film_urls() {
        assert_eq!(film_page_url("dune-part-two"), "https://letterboxd.com/film/dune-part-two");
        assert_eq!(
            film_poster_url("dune-part-two", 140, 210),
            "https://letterboxd.com/poster/film/dune-part-two/std/140x210"
        );
    }

    #[test]
    fn test_activity_urls() {
        assert_eq!(
            following_activity_url("someuser"),
            "https://letterboxd.com/someuser/activity/following"
        );
        assert_eq!(
            following_activity_ajax_url("someuser", "abc", None),
            "https://letterboxd.com/ajax/activity-pagination/someuser/following/?__csrf=abc"
        );
        assert_eq!(
            following_activity_ajax_url("someuser", "abc", Some("123")),
            "https://letterboxd.com/ajax/activity-pagination/someuser/following/?__csrf=abc&after=123"
        );
    }
}
