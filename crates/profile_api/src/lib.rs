//! Client for the user-profile backend.
//!
//! Wraps the three endpoints the profile screen talks to:
//! - `GET /api/user/profile` to load the current user's profile
//! - `PUT /api/user/profile` to store edited fields
//! - `POST /api/upload/image` to upload a profile or background image
//!
//! The [`ProfileApi`] trait is the seam the screen depends on; [`HttpProfileApi`]
//! is the `reqwest`-backed implementation used in real builds.

mod client;
mod error;
mod model;
mod settings;

pub use client::{HttpProfileApi, ProfileApi};
pub use error::ApiError;
pub use model::{
    AccessToken, ErrorBody, ProfileEnvelope, ProfilePayload, ProfileUpdate, UpdateOutcome,
    UploadEnvelope, UploadFile, UploadedImage,
};
pub use settings::ClientSettings;
