//! Message types for the profile page.
//!
//! UI events and finished async work arrive as [`PageMessage`]s. `update`
//! turns each into a [`PageCommand`]: owned async work that runs without
//! borrowing the page and reports back with another message.

use std::fmt;

use crate::auth::AuthSession;
use crate::form::{
    FormField, ImageFile, ImageKind, LoadRequest, LoadResponse, LoadedImage, PendingRead,
    SubmitRequest, SubmitResponse,
};
use crate::picker::{ImagePicker, TileEvent};

/// Events the profile page reacts to.
#[derive(Debug)]
pub enum PageMessage {
    // Lifecycle
    /// Page was mounted; load the profile
    Mounted,
    /// Auth context changed
    SessionChanged(AuthSession),
    /// The profile fetch finished
    ProfileLoaded(LoadResponse),

    // Form
    /// A text field was edited
    FieldChanged(FormField, String),
    /// Save pressed
    Submit,
    /// Uploads and update finished
    SubmitFinished(SubmitResponse),
    /// Cancel pressed
    Cancel,

    // Image picker
    /// Input on one of the image tiles
    Tile(ImageKind, TileEvent),
    /// The file chooser returned a file
    ImageChosen(ImageFile, ImageKind),
    /// A selected file finished reading
    ImageRead(LoadedImage),
}

/// Async work requested by `update`.
pub enum PageCommand {
    None,
    /// Fetch the profile for the current session
    LoadProfile(LoadRequest),
    /// Show the file chooser for a tile
    OpenChooser(ImagePicker<PageMessage>, ImageKind),
    /// Encode an accepted selection into a preview
    ReadImage(PendingRead),
    /// Upload images and store the profile
    SubmitProfile(SubmitRequest),
}

impl PageCommand {
    pub fn is_none(&self) -> bool {
        matches!(self, PageCommand::None)
    }

    /// Run the work. The returned message goes back through `update`.
    pub async fn perform(self) -> Option<PageMessage> {
        match self {
            PageCommand::None => None,
            PageCommand::LoadProfile(request) => {
                Some(PageMessage::ProfileLoaded(request.run().await))
            }
            PageCommand::OpenChooser(picker, kind) => picker.open(kind).await,
            PageCommand::ReadImage(read) => Some(PageMessage::ImageRead(read.read().await)),
            PageCommand::SubmitProfile(request) => {
                Some(PageMessage::SubmitFinished(request.run().await))
            }
        }
    }
}

impl fmt::Debug for PageCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCommand::None => f.write_str("None"),
            PageCommand::LoadProfile(request) => f.debug_tuple("LoadProfile").field(request).finish(),
            PageCommand::OpenChooser(_, kind) => f.debug_tuple("OpenChooser").field(kind).finish(),
            PageCommand::ReadImage(read) => f.debug_tuple("ReadImage").field(read).finish(),
            PageCommand::SubmitProfile(request) => {
                f.debug_tuple("SubmitProfile").field(request).finish()
            }
        }
    }
}
