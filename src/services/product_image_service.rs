//! Product image path checks.

use std::path::Path;

/// Decides whether a product's image path is acceptable.
///
/// Only the file extension is inspected; the file itself is never opened.
#[derive(Debug, Clone)]
pub struct ProductImageService {
    allowed_extensions: Vec<String>,
}

impl ProductImageService {
    pub fn new<I, S>(allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// A missing or empty path is valid; otherwise the extension must be allowed.
    pub fn is_valid(&self, image_path: Option<&str>) -> bool {
        let Some(path) = image_path.filter(|p| !p.is_empty()) else {
            return true;
        };

        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for ProductImageService {
    fn default() -> Self {
        Self::new(["jpg", "jpeg", "png", "gif"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_path_is_valid() {
        let service = ProductImageService::default();
        assert!(service.is_valid(None));
        assert!(service.is_valid(Some("")));
    }

    #[test]
    fn test_extension_check_ignores_case() {
        let service = ProductImageService::default();
        assert!(service.is_valid(Some("images/p1.JPG")));
        assert!(service.is_valid(Some("p2.png")));
    }

    #[test]
    fn test_rejects_unlisted_or_missing_extension() {
        let service = ProductImageService::default();
        assert!(!service.is_valid(Some("images/p1.exe")));
        assert!(!service.is_valid(Some("images/p1")));
    }

    #[test]
    fn test_configured_extensions_accept_leading_dot() {
        let service = ProductImageService::new([".webp"]);
        assert!(service.is_valid(Some("a.webp")));
        assert!(!service.is_valid(Some("a.jpg")));
    }
}
