//! Absolute links to uploaded product images.

use salvo::http::uri::{InvalidUri, Uri};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum MediaUrlError {
    #[error("media root `{url}` is not a valid uri: {source}")]
    InvalidUri {
        url: String,
        #[source]
        source: InvalidUri,
    },

    #[error("media root `{0}` is not absolute")]
    NotAbsolute(String),
}

/// Joins stored image paths onto the public media root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaUrls {
    root: String,
}

impl MediaUrls {
    /// `base_url` is the scheme and authority clients use; `media_path` the
    /// prefix images are served under. The root is validated once here so
    /// that building an image link cannot fail later.
    pub(crate) fn new(base_url: &str, media_path: &str) -> Result<Self, MediaUrlError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let media_path = encode_path(media_path.trim().trim_matches('/'));

        let root = if media_path.is_empty() {
            format!("{base_url}/")
        } else {
            format!("{base_url}/{media_path}/")
        };

        let uri = root
            .parse::<Uri>()
            .map_err(|source| MediaUrlError::InvalidUri {
                url: root.clone(),
                source,
            })?;

        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(MediaUrlError::NotAbsolute(root));
        }

        Ok(Self { root })
    }

    /// Absolute URL of a stored image. Products without an image have none.
    ///
    /// Each path segment is percent-encoded, so names with spaces or
    /// non-ASCII characters still yield a valid link.
    pub(crate) fn image_url(&self, image: Option<&str>) -> Option<String> {
        let image = image
            .map(|image| image.trim().trim_start_matches('/'))
            .filter(|image| !image.is_empty())?;

        Some(format!("{}{}", self.root, encode_path(image)))
    }
}

/// Percent-encode every `/`-separated segment of `path`.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn joins_base_media_and_image() -> TestResult {
        let media = MediaUrls::new("https://shop.example.com/", "/media/")?;

        assert_eq!(
            media.image_url(Some("products/2024/01/honey.jpg")).as_deref(),
            Some("https://shop.example.com/media/products/2024/01/honey.jpg")
        );

        Ok(())
    }

    #[test]
    fn missing_image_has_no_url() -> TestResult {
        let media = MediaUrls::new("https://shop.example.com", "/media/")?;

        assert_eq!(media.image_url(None), None);
        assert_eq!(media.image_url(Some("  ")), None);

        Ok(())
    }

    #[test]
    fn empty_media_path_serves_from_root() -> TestResult {
        let media = MediaUrls::new("http://localhost:8698", "")?;

        assert_eq!(
            media.image_url(Some("/dates.png")).as_deref(),
            Some("http://localhost:8698/dates.png")
        );

        Ok(())
    }

    #[test]
    fn spaces_in_image_names_are_encoded() -> TestResult {
        let media = MediaUrls::new("https://shop.example.com", "media")?;

        let url = media.image_url(Some("products/royal honey.jpg"));

        assert_eq!(
            url.as_deref(),
            Some("https://shop.example.com/media/products/royal%20honey.jpg")
        );
        assert!(
            url.is_some_and(|url| url.parse::<Uri>().is_ok()),
            "encoded link must parse as a uri"
        );

        Ok(())
    }

    #[test]
    fn bengali_image_names_are_encoded() -> TestResult {
        let media = MediaUrls::new("https://shop.example.com", "media")?;

        assert_eq!(
            media.image_url(Some("products/মধু.jpg")).as_deref(),
            Some("https://shop.example.com/media/products/%E0%A6%AE%E0%A6%A7%E0%A7%81.jpg")
        );

        Ok(())
    }

    #[test]
    fn reserved_characters_are_encoded() -> TestResult {
        let media = MediaUrls::new("https://shop.example.com", "media")?;

        assert_eq!(
            media.image_url(Some("salt & pepper#1+.png")).as_deref(),
            Some("https://shop.example.com/media/salt%20%26%20pepper%231%2B.png")
        );

        Ok(())
    }

    #[test]
    fn missing_base_url_is_rejected() {
        assert!(
            matches!(
                MediaUrls::new("", "media"),
                Err(MediaUrlError::NotAbsolute(_))
            ),
            "expected a path-only root to be rejected"
        );
    }

    #[test]
    fn base_without_scheme_is_rejected() {
        assert!(
            MediaUrls::new("shop", "media").is_err(),
            "expected a base url without a scheme to be rejected"
        );
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        assert!(
            matches!(
                MediaUrls::new("http://shop example.com", "media"),
                Err(MediaUrlError::InvalidUri { .. })
            ),
            "expected a base url with a space to be rejected"
        );
    }
}
