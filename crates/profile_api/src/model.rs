//! Wire types exchanged with the profile backend.
//!
//! Field names follow the backend's camelCase JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer credential attached to every authenticated request.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Response body of `GET /api/user/profile`.
///
/// `data` is absent when the user has no profile yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub data: Option<ProfilePayload>,
}

/// Profile as returned by the backend. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePayload {
    pub email: Option<String>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub phone_number: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub profile_image: Option<String>,
    pub bg_image: Option<String>,
}

/// Request body of `PUT /api/user/profile`.
///
/// Image fields serialize as `null` when no image should be stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub profile_image: Option<String>,
    pub last_name: String,
    pub first_name: String,
    pub phone_number: String,
    pub address1: String,
    pub address2: String,
    pub bg_image: Option<String>,
}

/// Result of a `PUT /api/user/profile` that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// HTTP status of the response
    pub status: u16,
    /// `success` flag from the body, when present
    pub success: Option<bool>,
}

impl UpdateOutcome {
    /// The update counts as accepted on an explicit success flag or a plain 200.
    pub fn accepted(&self) -> bool {
        self.success == Some(true) || self.status == 200
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateBody {
    #[serde(default)]
    pub success: Option<bool>,
}

/// Response body of `POST /api/upload/image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadEnvelope {
    #[serde(default)]
    pub data: Option<UploadedImage>,
}

impl UploadEnvelope {
    /// Hosted URL of the uploaded image, if the server returned a non-empty one.
    pub fn into_image_url(self) -> Option<String> {
        self.data
            .and_then(|d| d.image_url)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Error body some endpoints return alongside a failure status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A file to send as the `file` part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_data() {
        let env: ProfileEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.data.is_none());

        let env: ProfileEnvelope = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn test_payload_camel_case_and_partial() {
        let json = r#"{"data":{"name":"Alice","email":"a@x.com","lastName":"Kim","bgImage":"https://cdn/bg.png"}}"#;
        let env: ProfileEnvelope = serde_json::from_str(json).unwrap();
        let data = env.data.unwrap();
        assert_eq!(data.name.as_deref(), Some("Alice"));
        assert_eq!(data.email.as_deref(), Some("a@x.com"));
        assert_eq!(data.last_name.as_deref(), Some("Kim"));
        assert_eq!(data.bg_image.as_deref(), Some("https://cdn/bg.png"));
        assert!(data.first_name.is_none());
        assert!(data.profile_image.is_none());
    }

    #[test]
    fn test_update_serializes_null_images() {
        let update = ProfileUpdate {
            name: "Bob".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["name"], "Bob");
        assert!(value["profileImage"].is_null());
        assert!(value["bgImage"].is_null());
        assert_eq!(value["phoneNumber"], "");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_update_outcome_accepted() {
        let ok = UpdateOutcome {
            status: 200,
            success: None,
        };
        assert!(ok.accepted());

        let flagged = UpdateOutcome {
            status: 201,
            success: Some(true),
        };
        assert!(flagged.accepted());

        let no_content = UpdateOutcome {
            status: 204,
            success: None,
        };
        assert!(!no_content.accepted());

        let refused = UpdateOutcome {
            status: 202,
            success: Some(false),
        };
        assert!(!refused.accepted());
    }

    #[test]
    fn test_upload_envelope_image_url() {
        let env: UploadEnvelope =
            serde_json::from_str(r#"{"data":{"imageUrl":"https://cdn/a.png"}}"#).unwrap();
        assert_eq!(env.into_image_url().as_deref(), Some("https://cdn/a.png"));

        let env: UploadEnvelope = serde_json::from_str(r#"{"data":{"imageUrl":""}}"#).unwrap();
        assert_eq!(env.into_image_url(), None);

        let env: UploadEnvelope = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert_eq!(env.into_image_url(), None);
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
        assert_eq!(token.secret(), "super-secret");
    }
}
