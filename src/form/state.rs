//! Screen state and its transitions.
//!
//! Nothing in here performs I/O. The controller calls these transitions
//! around its network calls, and tests drive them directly.

use profile_api::{ProfilePayload, ProfileUpdate};

use super::errors::FormErrors;
use super::fields::{FormField, ProfileFormData};
use super::image::{ImageFile, ImageKind, ImageSlot, LoadedImage, PendingRead, is_data_uri};

/// The two loading flags the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    /// True from mount until the initial fetch settles, whatever its outcome
    pub is_loading_profile: bool,
    /// True only while a submit is in flight
    pub is_submitting: bool,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading_profile: true,
            is_submitting: false,
        }
    }
}

/// Everything the profile screen displays and edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormState {
    pub data: ProfileFormData,
    pub profile_image: ImageSlot,
    pub background_image: ImageSlot,
    pub errors: FormErrors,
    pub loading: LoadingState,
}

/// Snapshot of one image slot taken when a submit starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub kind: ImageKind,
    pub preview: Option<String>,
    pub pending: Option<ImageFile>,
    pub generation: u64,
}

/// Inputs to a submit, captured after validation passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    pub profile: SlotSnapshot,
    pub background: SlotSnapshot,
}

impl ProfileFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: ImageKind) -> &ImageSlot {
        match kind {
            ImageKind::Profile => &self.profile_image,
            ImageKind::Background => &self.background_image,
        }
    }

    fn slot_mut(&mut self, kind: ImageKind) -> &mut ImageSlot {
        match kind {
            ImageKind::Profile => &mut self.profile_image,
            ImageKind::Background => &mut self.background_image,
        }
    }

    /// Mark the initial load as settled without data.
    pub fn finish_loading(&mut self) {
        self.loading.is_loading_profile = false;
    }

    /// Start a fresh load (a new session token arrived).
    pub fn restart_loading(&mut self) {
        self.loading.is_loading_profile = true;
    }

    /// Apply the result of a successful profile fetch.
    ///
    /// Image URLs only replace the previews when the server sent a
    /// non-empty value.
    pub fn apply_profile_loaded(&mut self, payload: Option<ProfilePayload>) {
        if let Some(payload) = payload {
            if let Some(url) = payload.profile_image.as_ref().filter(|u| !u.is_empty()) {
                self.profile_image.preview = Some(url.clone());
            }
            if let Some(url) = payload.bg_image.as_ref().filter(|u| !u.is_empty()) {
                self.background_image.preview = Some(url.clone());
            }
            self.data = ProfileFormData::from_payload(&payload);
        }
        self.finish_loading();
    }

    /// Store a new value for `field` and drop that field's error.
    pub fn apply_field_change(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear(field);
    }

    /// Errors for the current values, computed from scratch.
    pub fn validate(&self) -> FormErrors {
        FormErrors::validate(&self.data)
    }

    /// Replace the stored errors with a fresh validation. Returns validity.
    pub fn apply_validation(&mut self) -> bool {
        self.errors = self.validate();
        self.errors.is_empty()
    }

    /// Register an accepted selection and hand back the read to perform.
    ///
    /// Preview and pending file stay untouched until the read is applied.
    pub fn begin_image_read(&mut self, kind: ImageKind, file: ImageFile) -> PendingRead {
        let slot = self.slot_mut(kind);
        slot.generation += 1;
        PendingRead {
            kind,
            generation: slot.generation,
            file,
        }
    }

    /// Apply a finished read. Reads superseded by a newer selection are dropped.
    pub fn apply_image_selected(&mut self, image: LoadedImage) -> bool {
        let slot = self.slot_mut(image.kind);
        if image.generation != slot.generation {
            log::debug!(
                "Discarding stale {} image read (generation {} < {})",
                image.kind,
                image.generation,
                slot.generation
            );
            return false;
        }
        slot.preview = Some(image.data_uri);
        slot.pending = Some(image.file);
        true
    }

    /// Validate and, when valid, enter the submitting state.
    pub fn begin_submit(&mut self) -> Option<SubmitPlan> {
        if !self.apply_validation() {
            return None;
        }
        self.loading.is_submitting = true;
        Some(SubmitPlan {
            profile: self.snapshot(ImageKind::Profile),
            background: self.snapshot(ImageKind::Background),
        })
    }

    fn snapshot(&self, kind: ImageKind) -> SlotSnapshot {
        let slot = self.slot(kind);
        SlotSnapshot {
            kind,
            preview: slot.preview.clone(),
            pending: slot.pending.clone(),
            generation: slot.generation,
        }
    }

    /// Record a completed upload: the hosted URL replaces the local preview
    /// and the pending file is consumed, unless the slot was re-selected
    /// while the upload ran.
    pub fn apply_upload_result(&mut self, kind: ImageKind, generation: u64, url: &str) -> bool {
        let slot = self.slot_mut(kind);
        if slot.generation != generation {
            return false;
        }
        slot.preview = Some(url.to_string());
        slot.pending = None;
        true
    }

    /// Leave the submitting state.
    pub fn apply_submit_result(&mut self) {
        self.loading.is_submitting = false;
    }

    /// Request body for the current values and resolved image URLs.
    pub fn build_update(
        &self,
        profile_image: Option<String>,
        bg_image: Option<String>,
    ) -> ProfileUpdate {
        ProfileUpdate {
            name: self.data.name.clone(),
            profile_image,
            last_name: self.data.last_name.clone(),
            first_name: self.data.first_name.clone(),
            phone_number: self.data.phone_number.clone(),
            address1: self.data.address1.clone(),
            address2: self.data.address2.clone(),
            bg_image,
        }
    }
}

/// Drop image values that are still local encodings; the server only
/// accepts hosted URLs.
pub fn sanitize_image_url(url: Option<String>) -> Option<String> {
    url.filter(|u| !is_data_uri(u))
}
