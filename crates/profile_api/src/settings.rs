//! Connection settings for the profile backend.

use serde::{Deserialize, Serialize};

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Scheme + host (+ optional port), without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the profile resource (GET and PUT)
    #[serde(default = "default_profile_path")]
    pub profile_path: String,

    /// Path of the image upload endpoint
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Per-request timeout (native builds only; browsers manage their own)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Send cookies along with requests (browser `credentials: include`)
    #[serde(default = "default_include_credentials")]
    pub include_credentials: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_profile_path() -> String {
    "/api/user/profile".to_string()
}

fn default_upload_path() -> String {
    "/api/upload/image".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_include_credentials() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile_path: default_profile_path(),
            upload_path: default_upload_path(),
            request_timeout_secs: default_request_timeout_secs(),
            include_credentials: default_include_credentials(),
        }
    }
}

impl ClientSettings {
    /// Full URL of the profile resource.
    pub fn profile_url(&self) -> String {
        join_url(&self.base_url, &self.profile_path)
    }

    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let settings = ClientSettings::default();
        assert_eq!(settings.profile_url(), "http://localhost:8080/api/user/profile");
        assert_eq!(settings.upload_url(), "http://localhost:8080/api/upload/image");
    }

    #[test]
    fn test_join_handles_slashes() {
        let settings = ClientSettings {
            base_url: "https://example.com/".to_string(),
            profile_path: "api/user/profile".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.profile_url(), "https://example.com/api/user/profile");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"base_url":"https://api.example.com"}"#).unwrap();
        assert_eq!(settings.base_url, "https://api.example.com");
        assert_eq!(settings.upload_path, "/api/upload/image");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.include_credentials);
    }
}
