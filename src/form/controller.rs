//! Profile form controller: the screen's state plus the backend calls that
//! load, upload and submit it.
//!
//! Each network operation comes in two shapes. The `async` methods
//! ([`load_profile`](ProfileFormController::load_profile),
//! [`submit_profile`](ProfileFormController::submit_profile)) run start to
//! finish while borrowing the controller. The split form
//! (`begin_load` / [`LoadRequest::run`] / `finish_load`, and
//! `prepare_submit` / [`SubmitRequest::run`] / `finish_submit`) only touches
//! the state in the synchronous steps, so a host can keep editing and
//! rendering while a request is in flight.

use std::fmt;
use std::rc::Rc;

use profile_api::{
    AccessToken, ApiError, ProfileApi, ProfilePayload, ProfileUpdate, UpdateOutcome,
};
use thiserror::Error;

use super::errors::FormErrors;
use super::fields::{FormField, ProfileFormData, UnknownFieldError};
use super::image::{
    ImageFile, ImageKind, ImageRejection, ImageSlot, LoadedImage, PendingRead, check_selection,
};
use super::state::{LoadingState, ProfileFormState, SlotSnapshot, sanitize_image_url};
use crate::auth::AuthSession;

/// How a profile load ended. Failures are reported, never raised.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No access token; nothing was fetched
    Skipped,
    /// The server returned a profile
    Loaded,
    /// The server has no profile for this user yet
    Empty,
    /// The fetch failed; the form keeps its defaults
    Failed(ApiError),
    /// The session changed while the fetch ran; its result was dropped
    Superseded,
}

/// Why a submit could not reach a verdict from the server.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmitError::Api(e) => e.server_message(),
            SubmitError::NotAuthenticated => None,
        }
    }
}

/// A profile fetch detached from the controller.
pub struct LoadRequest {
    api: Rc<dyn ProfileApi>,
    token: AccessToken,
}

impl LoadRequest {
    pub async fn run(self) -> LoadResponse {
        let result = self.api.fetch_profile(&self.token).await;
        LoadResponse {
            token: self.token,
            result,
        }
    }
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Result of a [`LoadRequest`], tagged with the token it was made for.
#[derive(Debug)]
pub struct LoadResponse {
    pub token: AccessToken,
    pub result: Result<Option<ProfilePayload>, ApiError>,
}

/// Upload + update sequence detached from the controller.
///
/// Carries the form values as they were when the submit started.
pub struct SubmitRequest {
    api: Rc<dyn ProfileApi>,
    token: AccessToken,
    draft: ProfileUpdate,
    slots: [SlotSnapshot; 2],
}

/// Outcome of uploading one slot's pending file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub kind: ImageKind,
    pub generation: u64,
    pub url: String,
}

/// Result of a [`SubmitRequest`].
#[derive(Debug)]
pub struct SubmitResponse {
    pub uploads: Vec<UploadReport>,
    pub update: ProfileUpdate,
    pub result: Result<UpdateOutcome, ApiError>,
}

impl SubmitRequest {
    pub async fn run(self) -> SubmitResponse {
        let mut update = self.draft;
        let mut uploads = Vec::new();

        for snapshot in self.slots {
            let mut url = snapshot.preview;
            if let Some(file) = snapshot.pending.as_ref() {
                if let Some(uploaded) = upload_or_log(self.api.as_ref(), &self.token, file).await {
                    uploads.push(UploadReport {
                        kind: snapshot.kind,
                        generation: snapshot.generation,
                        url: uploaded.clone(),
                    });
                    url = Some(uploaded);
                }
            }

            let url = sanitize_image_url(url);
            if snapshot.pending.is_some() && url.is_none() {
                log::warn!("Dropping {} image change: upload did not succeed", snapshot.kind);
            }
            match snapshot.kind {
                ImageKind::Profile => update.profile_image = url,
                ImageKind::Background => update.bg_image = url,
            }
        }

        let result = self.api.update_profile(&self.token, &update).await;
        SubmitResponse {
            uploads,
            update,
            result,
        }
    }
}

impl fmt::Debug for SubmitRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitRequest")
            .field("draft", &self.draft)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

async fn try_upload(
    api: &dyn ProfileApi,
    token: &AccessToken,
    file: &ImageFile,
) -> Result<Option<String>, ApiError> {
    api.upload_image(token, file.to_upload()).await
}

async fn upload_or_log(api: &dyn ProfileApi, token: &AccessToken, file: &ImageFile) -> Option<String> {
    match try_upload(api, token, file).await {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Image upload failed for '{}': {}", file.name(), e);
            None
        }
    }
}

/// Owns the profile screen's state and talks to the backend on its behalf.
pub struct ProfileFormController {
    state: ProfileFormState,
    session: AuthSession,
    api: Rc<dyn ProfileApi>,
}

impl ProfileFormController {
    /// Fresh controller in the "loading profile" state. Call
    /// [`load_profile`](Self::load_profile) (or use [`mount`](Self::mount)) to
    /// settle it.
    pub fn new(session: AuthSession, api: Rc<dyn ProfileApi>) -> Self {
        Self {
            state: ProfileFormState::new(),
            session,
            api,
        }
    }

    /// Construct and run the initial load.
    pub async fn mount(session: AuthSession, api: Rc<dyn ProfileApi>) -> Self {
        let mut controller = Self::new(session, api);
        controller.load_profile().await;
        controller
    }

    pub fn state(&self) -> &ProfileFormState {
        &self.state
    }

    pub fn form_data(&self) -> &ProfileFormData {
        &self.state.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.state.errors
    }

    pub fn loading(&self) -> LoadingState {
        self.state.loading
    }

    pub fn is_loading_profile(&self) -> bool {
        self.state.loading.is_loading_profile
    }

    pub fn is_submitting(&self) -> bool {
        self.state.loading.is_submitting
    }

    pub fn image(&self, kind: ImageKind) -> &ImageSlot {
        self.state.slot(kind)
    }

    pub fn preview(&self, kind: ImageKind) -> Option<&str> {
        self.state.slot(kind).preview()
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Fetch the current user's profile into the form.
    pub async fn load_profile(&mut self) -> LoadOutcome {
        match self.begin_load() {
            Some(request) => {
                let response = request.run().await;
                self.finish_load(response)
            }
            None => LoadOutcome::Skipped,
        }
    }

    /// Start a load. Without a token the load settles immediately and `None`
    /// is returned.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        let Some(token) = self.session.token().cloned() else {
            log::debug!("No access token; skipping profile load");
            self.state.finish_loading();
            return None;
        };
        Some(LoadRequest {
            api: Rc::clone(&self.api),
            token,
        })
    }

    /// Apply a finished load.
    pub fn finish_load(&mut self, response: LoadResponse) -> LoadOutcome {
        if self.session.token() != Some(&response.token) {
            log::debug!("Dropping profile fetched for a previous session");
            return LoadOutcome::Superseded;
        }

        match response.result {
            Ok(Some(payload)) => {
                log::info!("Loaded profile");
                self.state.apply_profile_loaded(Some(payload));
                LoadOutcome::Loaded
            }
            Ok(None) => {
                log::info!("No profile stored yet");
                self.state.apply_profile_loaded(None);
                LoadOutcome::Empty
            }
            Err(e) => {
                log::warn!("Failed to load profile: {}", e);
                self.state.finish_loading();
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Swap in a new session; reloads when the access token changed.
    pub async fn update_session(&mut self, session: AuthSession) -> Option<LoadOutcome> {
        if !self.replace_session(session) {
            return None;
        }
        Some(self.load_profile().await)
    }

    /// Swap in a new session. Returns true when the token changed, in which
    /// case the form is back in the loading state and a load should follow.
    pub fn replace_session(&mut self, session: AuthSession) -> bool {
        let token_changed = session.access_token != self.session.access_token;
        self.session = session;
        if token_changed {
            self.state.restart_loading();
        }
        token_changed
    }

    pub fn handle_field_change(&mut self, field: FormField, value: impl Into<String>) {
        self.state.apply_field_change(field, value);
    }

    /// Field change addressed by input name.
    pub fn handle_change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownFieldError> {
        let field: FormField = name.parse()?;
        self.handle_field_change(field, value);
        Ok(())
    }

    /// Recompute the errors from scratch. Returns whether the form is valid.
    pub fn validate_form(&mut self) -> bool {
        self.state.apply_validation()
    }

    /// Check a selected file and hand back the read that produces its preview.
    ///
    /// On rejection nothing changes; the caller shows the error to the user.
    pub fn handle_image_select(
        &mut self,
        file: Option<ImageFile>,
        kind: ImageKind,
    ) -> Result<PendingRead, ImageRejection> {
        let file = check_selection(file).inspect_err(|e| {
            log::info!("Rejected {} image selection: {}", kind, e);
        })?;
        Ok(self.state.begin_image_read(kind, file))
    }

    /// Apply a finished read. Returns false when a newer selection superseded it.
    pub fn complete_image_read(&mut self, image: LoadedImage) -> bool {
        self.state.apply_image_selected(image)
    }

    /// Upload one file and return its hosted URL.
    pub async fn try_upload_image(&self, file: &ImageFile) -> Result<Option<String>, ApiError> {
        let Some(token) = self.session.token() else {
            return Ok(None);
        };
        try_upload(self.api.as_ref(), token, file).await
    }

    /// Upload one file; any failure yields `None`.
    pub async fn upload_image(&self, file: Option<&ImageFile>) -> Option<String> {
        let file = file?;
        let token = self.session.token()?;
        upload_or_log(self.api.as_ref(), token, file).await
    }

    /// Validate, upload any pending images, then store the profile.
    ///
    /// `Ok(false)` covers both a failed validation (no request sent) and a
    /// response that did not signal success.
    pub async fn submit_profile(&mut self) -> Result<bool, SubmitError> {
        let Some(request) = self.prepare_submit()? else {
            return Ok(false);
        };
        let response = request.run().await;
        self.finish_submit(response)
    }

    /// Validate and enter the submitting state.
    ///
    /// `Ok(None)` when validation failed; nothing is sent then.
    pub fn prepare_submit(&mut self) -> Result<Option<SubmitRequest>, SubmitError> {
        let Some(token) = self.session.token().cloned() else {
            if !self.validate_form() {
                return Ok(None);
            }
            return Err(SubmitError::NotAuthenticated);
        };
        let Some(plan) = self.state.begin_submit() else {
            log::debug!("Submit blocked by validation: {:?}", self.state.errors);
            return Ok(None);
        };

        Ok(Some(SubmitRequest {
            api: Rc::clone(&self.api),
            token,
            draft: self.state.build_update(None, None),
            slots: [plan.profile, plan.background],
        }))
    }

    /// Apply a finished submit and leave the submitting state.
    pub fn finish_submit(&mut self, response: SubmitResponse) -> Result<bool, SubmitError> {
        for upload in &response.uploads {
            self.state
                .apply_upload_result(upload.kind, upload.generation, &upload.url);
        }
        self.state.apply_submit_result();

        match response.result {
            Ok(outcome) => {
                let accepted = outcome.accepted();
                log::info!("Profile update answered {} (accepted: {})", outcome.status, accepted);
                Ok(accepted)
            }
            Err(e) => {
                log::warn!("Profile update failed: {}", e);
                Err(SubmitError::Api(e))
            }
        }
    }
}
