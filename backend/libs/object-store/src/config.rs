/// Object storage configuration shared by upload and delete paths
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL under which uploaded objects are publicly reachable
    pub public_base_url: String,
}

impl StoreConfig {
    /// Load object storage configuration from environment variables
    pub fn from_env() -> Self {
        let bucket =
            std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "scribble-images".to_string());
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("https://{}.s3.amazonaws.com", bucket));

        Self {
            bucket,
            region,
            public_base_url,
        }
    }

    /// Public URL for an object key
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }

    /// Recover the object key from a public URL.
    ///
    /// URLs under the configured base map directly; for anything else the
    /// last path segment is used, matching how legacy image URLs were
    /// stored.
    pub fn key_for_public_url(&self, url: &str) -> Option<String> {
        let base = format!("{}/", self.public_base_url.trim_end_matches('/'));
        if let Some(key) = url.strip_prefix(&base) {
            if !key.is_empty() {
                return Some(key.to_string());
            }
        }

        url.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StoreConfig {
        StoreConfig {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            public_base_url: "https://cdn.example.com".to_string(),
        }
    }

    #[test]
    fn public_url_joins_base_and_key() {
        let config = test_config();
        assert_eq!(
            config.public_url("u1-abc.png"),
            "https://cdn.example.com/u1-abc.png"
        );
    }

    #[test]
    fn key_recovered_from_url_under_base() {
        let config = test_config();
        assert_eq!(
            config.key_for_public_url("https://cdn.example.com/u1-abc.png"),
            Some("u1-abc.png".to_string())
        );
    }

    #[test]
    fn key_falls_back_to_last_segment_for_foreign_urls() {
        let config = test_config();
        assert_eq!(
            config.key_for_public_url("https://other.example.com/images/u1-abc.png"),
            Some("u1-abc.png".to_string())
        );
    }

    #[test]
    fn key_absent_for_empty_path() {
        let config = test_config();
        assert_eq!(config.key_for_public_url(""), None);
    }
}
