//! Filename-stem helpers for the media diff heuristic.
//!
//! The platform decorates uploaded filenames (`shoe-front.jpg` becomes
//! `shoe-front_1234.jpg` or similar), so image correspondence is decided by
//! substring containment of the filename stem rather than exact equality.
//! The containment check can mis-match stems that are prefixes of one
//! another; this is a known limitation of the heuristic, kept because the
//! synced catalogs depend on it.

/// Last path segment of a URL, query string excluded.
#[must_use]
pub fn url_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Filename stem of a supplier URL: last segment up to the first `.`.
#[must_use]
pub fn url_stem(url: &str) -> &str {
    let name = url_file_name(url);
    name.split('.').next().unwrap_or(name)
}

/// Filename stem of a platform URL with upload decoration stripped: last
/// segment up to the first `.`, then up to the first `_`.
#[must_use]
pub fn platform_stem(url: &str) -> &str {
    let stem = url_stem(url);
    stem.split('_').next().unwrap_or(stem)
}

/// Normalized file name used when staging supplier documents: last segment
/// with `%` escapes flattened to `_` and surrounding whitespace trimmed.
#[must_use]
pub fn sanitize_file_name(url: &str) -> String {
    url_file_name(url).replace('%', "_").trim().to_string()
}

/// File extension of a URL's last segment, if any.
#[must_use]
pub fn url_extension(url: &str) -> Option<&str> {
    let name = url_file_name(url);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_file_name() {
        assert_eq!(
            url_file_name("https://cdn.example.com/a/b/shoe-front.jpg"),
            "shoe-front.jpg"
        );
        assert_eq!(
            url_file_name("https://cdn.example.com/a/shoe.jpg?v=2"),
            "shoe.jpg"
        );
    }

    #[test]
    fn test_url_stem_stops_at_first_dot() {
        assert_eq!(url_stem("https://x/y/manual.v2.pdf"), "manual");
        assert_eq!(url_stem("https://x/y/shoe-front.jpg"), "shoe-front");
    }

    #[test]
    fn test_platform_stem_strips_decoration() {
        assert_eq!(
            platform_stem("https://cdn.shopify.com/files/shoe-front_1234.jpg"),
            "shoe-front"
        );
        assert_eq!(
            platform_stem("https://cdn.shopify.com/files/shoe-front.jpg"),
            "shoe-front"
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("https://s3.example.com/docs/manual%20de.pdf "),
            "manual_20de.pdf"
        );
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://x/m.pdf"), Some("pdf"));
        assert_eq!(url_extension("https://x/noext"), None);
    }
}
