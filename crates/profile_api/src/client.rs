//! `ProfileApi` trait and its HTTP implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use web_time::Instant;

use crate::error::ApiError;
use crate::model::{
    AccessToken, ProfileEnvelope, ProfilePayload, ProfileUpdate, UpdateBody, UpdateOutcome,
    UploadEnvelope, UploadFile,
};
use crate::settings::ClientSettings;

/// Operations the profile screen needs from the backend.
///
/// Futures are not required to be `Send` so that browser implementations
/// (which hold JS values) can implement the trait.
#[async_trait(?Send)]
pub trait ProfileApi {
    /// Load the current user's profile. `Ok(None)` means "no profile yet".
    async fn fetch_profile(&self, token: &AccessToken)
    -> Result<Option<ProfilePayload>, ApiError>;

    /// Upload one image, returning its hosted URL when the server provides one.
    async fn upload_image(
        &self,
        token: &AccessToken,
        file: UploadFile,
    ) -> Result<Option<String>, ApiError>;

    /// Store the edited profile.
    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<UpdateOutcome, ApiError>;
}

/// `reqwest`-backed [`ProfileApi`].
#[derive(Debug, Clone)]
pub struct HttpProfileApi {
    client: Client,
    settings: ClientSettings,
}

impl HttpProfileApi {
    /// Build a client for the given backend.
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder =
            builder.timeout(std::time::Duration::from_secs(settings.request_timeout_secs));

        let client = builder.build()?;
        log::debug!("Profile API client ready for {}", settings.base_url);
        Ok(Self { client, settings })
    }

    /// Settings this client was built with.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    #[cfg(target_arch = "wasm32")]
    fn with_credentials(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.settings.include_credentials {
            builder.fetch_credentials_include()
        } else {
            builder
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn with_credentials(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
    }

    /// Send an authenticated request and return status + body of a 2xx response.
    async fn send(
        &self,
        label: &str,
        builder: RequestBuilder,
        token: &AccessToken,
    ) -> Result<(u16, String), ApiError> {
        let start = Instant::now();
        let builder = self.with_credentials(builder.bearer_auth(token.secret()));
        let response = builder.send().await?;
        let (status, body) = read_response(response).await?;

        log::debug!("{} -> {} in {:?}", label, status, start.elapsed());

        check_status(status, &body)?;
        Ok((status, body))
    }
}

/// Reject non-2xx responses, keeping the server's message.
pub(crate) fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::from_status_body(status, body))
    }
}

/// Body of `GET /api/profile`. An empty body means no profile yet.
pub(crate) fn parse_profile_body(body: &str) -> Result<Option<ProfilePayload>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let envelope: ProfileEnvelope = serde_json::from_str(body)?;
    Ok(envelope.data)
}

/// Body of `POST /api/upload/image`.
pub(crate) fn parse_upload_body(body: &str) -> Result<Option<String>, ApiError> {
    let envelope: UploadEnvelope = serde_json::from_str(body)?;
    Ok(envelope.into_image_url())
}

/// Body of `PUT /api/profile`. Some deployments answer with an empty or
/// non-JSON body; the status alone decides then.
pub(crate) fn parse_update_body(status: u16, body: &str) -> UpdateOutcome {
    let success = serde_json::from_str::<UpdateBody>(body)
        .ok()
        .and_then(|b| b.success);
    UpdateOutcome { status, success }
}

async fn read_response(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}

#[async_trait(?Send)]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(
        &self,
        token: &AccessToken,
    ) -> Result<Option<ProfilePayload>, ApiError> {
        let url = self.settings.profile_url();
        let (_, body) = self
            .send(&format!("GET {}", url), self.client.get(&url), token)
            .await?;

        parse_profile_body(&body)
    }

    async fn upload_image(
        &self,
        token: &AccessToken,
        file: UploadFile,
    ) -> Result<Option<String>, ApiError> {
        let url = self.settings.upload_url();
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|_| ApiError::InvalidContentType(file.content_type.clone()))?;
        let form = Form::new().part("file", part);

        log::debug!("Uploading {} ({} bytes)", file.file_name, size);
        let (_, body) = self
            .send(
                &format!("POST {}", url),
                self.client.post(&url).multipart(form),
                token,
            )
            .await?;

        parse_upload_body(&body)
    }

    async fn update_profile(
        &self,
        token: &AccessToken,
        update: &ProfileUpdate,
    ) -> Result<UpdateOutcome, ApiError> {
        let url = self.settings.profile_url();
        let (status, body) = self
            .send(
                &format!("PUT {}", url),
                self.client.put(&url).json(update),
                token,
            )
            .await?;

        Ok(parse_update_body(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_settings() {
        let settings = ClientSettings {
            base_url: "https://api.example.com".to_string(),
            ..Default::default()
        };
        let api = HttpProfileApi::new(settings.clone()).unwrap();
        assert_eq!(api.settings(), &settings);
    }

    #[test]
    fn test_empty_profile_body_means_no_profile() {
        assert_eq!(parse_profile_body("").unwrap(), None);
        assert_eq!(parse_profile_body("  \n").unwrap(), None);
        assert_eq!(parse_profile_body(r#"{"data":null}"#).unwrap(), None);
    }

    #[test]
    fn test_profile_body_is_unwrapped() {
        let payload = parse_profile_body(r#"{"data":{"name":"Alice","phoneNumber":"010"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(payload.name.as_deref(), Some("Alice"));
        assert_eq!(payload.phone_number.as_deref(), Some("010"));
    }

    #[test]
    fn test_garbled_profile_body_is_decode_error() {
        let err = parse_profile_body("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_upload_body_yields_url() {
        assert_eq!(
            parse_upload_body(r#"{"data":{"imageUrl":"https://cdn/a.png"}}"#).unwrap(),
            Some("https://cdn/a.png".to_string())
        );
        assert_eq!(parse_upload_body(r#"{"data":{"imageUrl":""}}"#).unwrap(), None);
        assert_eq!(parse_upload_body("{}").unwrap(), None);
        assert!(parse_upload_body("").is_err());
    }

    #[test]
    fn test_update_body_without_json_keeps_status_only() {
        let empty = parse_update_body(200, "");
        assert_eq!(empty, UpdateOutcome { status: 200, success: None });
        assert!(empty.accepted());

        let text = parse_update_body(204, "OK");
        assert_eq!(text.success, None);
        assert!(!text.accepted());

        let flagged = parse_update_body(201, r#"{"success":true}"#);
        assert_eq!(flagged.success, Some(true));
        assert!(flagged.accepted());
    }

    #[test]
    fn test_non_success_status_carries_server_message() {
        assert!(check_status(200, "").is_ok());
        assert!(check_status(299, "").is_ok());

        let err = check_status(409, r#"{"message":"Nickname already taken"}"#).unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.server_message(), Some("Nickname already taken"));

        let err = check_status(500, "Internal Server Error").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, message: None }));
    }
}
