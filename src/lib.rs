//! Profile Editor
//!
//! The "edit my profile" screen: loads the signed-in user's profile, lets
//! them edit it and pick new profile and background images, uploads the
//! images and stores the result. Runs in the browser (wasm32) or embedded in
//! a native host.

pub mod auth;
pub mod callback;
pub mod config;
pub mod constants;
pub mod form;
pub mod logging;
pub mod message;
pub mod page;
pub mod picker;
pub mod runtime;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(test)]
mod test_support;

pub use auth::AuthSession;
pub use config::{ConfigError, EditorConfig, LogLevel, RouteConfig};
pub use form::{LoadOutcome, ProfileFormController, SubmitError};
pub use message::{PageCommand, PageMessage};
pub use page::{Navigator, Notice, NoticeKind, Notifier, PageView, ProfilePage};
pub use picker::{FileChooser, ImagePicker, RfdFileChooser};
pub use runtime::{LocalTask, PageHandle, Spawner};
pub use profile_api::{AccessToken, ApiError, ClientSettings, HttpProfileApi, ProfileApi};
