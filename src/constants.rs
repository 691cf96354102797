//! Global constants for the profile editor.

/// Image selection limits and encoding.
pub mod image {
    /// Largest accepted image, in bytes (2 MiB, inclusive).
    pub const MAX_BYTES: usize = 2 * 1024 * 1024;
    /// Prefix every content type of an acceptable image starts with.
    pub const CONTENT_TYPE_PREFIX: &str = "image/";
    /// Scheme prefix of a locally encoded preview.
    pub const DATA_URI_PREFIX: &str = "data:";
    /// Value for the hidden file control's `accept` attribute.
    pub const ACCEPT: &str = "image/*";
    /// Extensions offered by the file chooser.
    pub const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];
}

/// Default navigation targets.
pub mod routes {
    /// Where a successful save lands.
    pub const HOME: &str = "/";
    /// Where unauthenticated visitors are sent.
    pub const LOGIN: &str = "/login";
}

/// Literal strings shown on the screen.
pub mod labels {
    pub const PAGE_TITLE: &str = "Edit profile";
    pub const LOADING: &str = "Loading your profile...";
    pub const CANCEL: &str = "Cancel";
    pub const SAVE: &str = "Save";

    pub const PROFILE_PLACEHOLDER: &str = "Select image";
    pub const PROFILE_OVERLAY: &str = "Change";
    pub const PROFILE_ALT: &str = "Profile image";
    pub const BACKGROUND_PLACEHOLDER: &str = "Select background image";
    pub const BACKGROUND_OVERLAY: &str = "Change background";
    pub const IMAGE_HINT: &str = "Click the profile or background image to change it";

    pub const NICKNAME: &str = "Nickname";
    pub const NICKNAME_PLACEHOLDER: &str = "Enter your nickname";
    pub const LAST_NAME: &str = "Last name";
    pub const LAST_NAME_PLACEHOLDER: &str = "Enter your last name";
    pub const FIRST_NAME: &str = "First name";
    pub const FIRST_NAME_PLACEHOLDER: &str = "Enter your first name";
    pub const PHONE_NUMBER: &str = "Phone number";
    pub const PHONE_NUMBER_PLACEHOLDER: &str = "Enter your phone number";
    pub const ADDRESS1: &str = "Address 1";
    pub const ADDRESS1_PLACEHOLDER: &str = "City / District";
    pub const ADDRESS2: &str = "Address 2";
    pub const ADDRESS2_PLACEHOLDER: &str = "Detailed address";
}

/// Notification texts.
pub mod notice {
    pub const SAVED: &str = "Your profile has been updated.";
    pub const SAVE_FAILED: &str = "Failed to update the profile.";
    pub const SAVE_ERROR: &str = "An error occurred while updating the profile.";
}
