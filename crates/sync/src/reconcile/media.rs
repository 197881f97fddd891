//! Image diffing by filename stem.
//!
//! The platform rewrites uploaded filenames, so equality is decided by
//! stem containment (see `skubridge_core::media`). The containment check
//! is deliberately fuzzy; stems that are prefixes of one another can
//! mis-match, and the synced catalogs depend on the current behavior.

use skubridge_core::{MediaImage, media};

/// Planned media changes for one product.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MediaDiff {
    /// Supplier URLs to attach as new media.
    pub additions: Vec<String>,
    /// Platform media ids to detach.
    pub deletion_ids: Vec<String>,
}

impl MediaDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletion_ids.is_empty()
    }
}

/// Diff the supplier's full-size image URLs against the product's
/// current platform media.
#[must_use]
pub fn diff(supplier_urls: &[&str], platform_media: &[MediaImage]) -> MediaDiff {
    let additions = supplier_urls
        .iter()
        .filter(|url| {
            let stem = media::url_stem(url);
            !platform_media.iter().any(|image| image.url.contains(stem))
        })
        .map(|url| (*url).to_string())
        .collect();

    let deletion_ids = platform_media
        .iter()
        .filter(|image| {
            let stem = media::platform_stem(&image.url);
            !supplier_urls.iter().any(|url| url.contains(stem))
        })
        .map(|image| image.id.clone())
        .collect();

    MediaDiff {
        additions,
        deletion_ids,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn image(id: &str, url: &str) -> MediaImage {
        MediaImage {
            id: id.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_decorated_platform_name_matches_supplier_stem() {
        let supplier = ["https://cdn.supplier.example/shoe-front.jpg"];
        let platform = [image(
            "m1",
            "https://cdn.shopify.com/files/shoe-front_1234.jpg",
        )];
        assert!(diff(&supplier, &platform).is_empty());
    }

    #[test]
    fn test_new_supplier_image_is_added() {
        let supplier = [
            "https://cdn.supplier.example/shoe-front.jpg",
            "https://cdn.supplier.example/shoe-side.jpg",
        ];
        let platform = [image("m1", "https://cdn.shopify.com/files/shoe-front_1.jpg")];
        let result = diff(&supplier, &platform);
        assert_eq!(result.additions, vec!["https://cdn.supplier.example/shoe-side.jpg"]);
        assert!(result.deletion_ids.is_empty());
    }

    #[test]
    fn test_stale_platform_image_is_deleted() {
        let supplier = ["https://cdn.supplier.example/shoe-front.jpg"];
        let platform = [
            image("m1", "https://cdn.shopify.com/files/shoe-front_1.jpg"),
            image("m2", "https://cdn.shopify.com/files/retired-shot_2.jpg"),
        ];
        let result = diff(&supplier, &platform);
        assert!(result.additions.is_empty());
        assert_eq!(result.deletion_ids, vec!["m2"]);
    }

    #[test]
    fn test_no_supplier_images_deletes_everything() {
        let platform = [image("m1", "https://cdn.shopify.com/files/shot_1.jpg")];
        let result = diff(&[], &platform);
        assert_eq!(result.deletion_ids, vec!["m1"]);
    }
}
