//! Image picker: the profile and background tiles.
//!
//! Each tile sits over a hidden file chooser. Activating a tile (click or
//! Enter) opens the chooser; a chosen file is reported to the parent through
//! a callback. The picker does no validation of its own.

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::callback::Callback;
use crate::constants::{image, labels};
use crate::form::{ImageFile, ImageKind};

/// The native file-selection control behind a tile.
#[async_trait(?Send)]
pub trait FileChooser {
    /// Let the user pick a file. `None` if the dialog was dismissed.
    async fn choose(&self, kind: ImageKind) -> Option<ImageFile>;
}

/// System file dialog (desktop) or browser file input (web) via `rfd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdFileChooser;

#[async_trait(?Send)]
impl FileChooser for RfdFileChooser {
    async fn choose(&self, kind: ImageKind) -> Option<ImageFile> {
        let title = match kind {
            ImageKind::Profile => "Choose a profile image",
            ImageKind::Background => "Choose a background image",
        };

        let handle = rfd::AsyncFileDialog::new()
            .set_title(title)
            .add_filter("Images", image::EXTENSIONS)
            .pick_file()
            .await?;

        let name = handle.file_name();
        let bytes = handle.read().await;
        log::debug!("Picked {} image '{}' ({} bytes)", kind, name, bytes.len());
        Some(ImageFile::from_named_bytes(name, bytes))
    }
}

/// Keys a focused tile reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Char(char),
}

/// Input delivered to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    Click,
    KeyDown(Key),
}

impl TileEvent {
    /// Whether this event opens the tile's file chooser.
    pub fn opens_chooser(self) -> bool {
        matches!(self, TileEvent::Click | TileEvent::KeyDown(Key::Enter))
    }
}

/// What a tile shows in its main area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TileContent {
    /// Current image (hosted URL or local preview)
    Preview(String),
    /// Nothing chosen yet
    Placeholder(&'static str),
}

/// Render description of one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub kind: ImageKind,
    pub content: TileContent,
    /// Label of the hover overlay
    pub overlay_label: &'static str,
    /// Alternative text when the content is an image
    pub alt: Option<&'static str>,
    /// `accept` filter of the hidden file control
    pub accept: &'static str,
}

/// Render description of the whole picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerView {
    pub background: TileView,
    pub profile: TileView,
    pub hint: &'static str,
}

/// Profile + background image tiles.
pub struct ImagePicker<M> {
    chooser: Rc<dyn FileChooser>,
    on_select: Callback<(ImageFile, ImageKind), M>,
}

// Clones share the chooser and the callback.
impl<M> Clone for ImagePicker<M> {
    fn clone(&self) -> Self {
        Self {
            chooser: Rc::clone(&self.chooser),
            on_select: self.on_select.clone(),
        }
    }
}

impl<M> ImagePicker<M> {
    pub fn new(chooser: Rc<dyn FileChooser>) -> Self {
        Self {
            chooser,
            on_select: Callback::none(),
        }
    }

    /// Message to emit when a file is chosen.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn((ImageFile, ImageKind)) -> M + 'static,
    {
        self.on_select = Callback::new(f);
        self
    }

    pub fn is_activation(event: TileEvent) -> bool {
        event.opens_chooser()
    }

    /// Open the chooser for `kind` and report the chosen file, if any.
    pub async fn open(&self, kind: ImageKind) -> Option<M> {
        let file = self.chooser.choose(kind).await;
        self.file_chosen(file, kind)
    }

    /// Report a file coming from the chooser. Dismissed dialogs emit nothing.
    pub fn file_chosen(&self, file: Option<ImageFile>, kind: ImageKind) -> Option<M> {
        let file = file?;
        self.on_select.call((file, kind))
    }

    pub fn view(&self, profile_preview: Option<&str>, background_preview: Option<&str>) -> PickerView {
        PickerView {
            background: TileView {
                kind: ImageKind::Background,
                content: tile_content(background_preview, labels::BACKGROUND_PLACEHOLDER),
                overlay_label: labels::BACKGROUND_OVERLAY,
                alt: None,
                accept: image::ACCEPT,
            },
            profile: TileView {
                kind: ImageKind::Profile,
                content: tile_content(profile_preview, labels::PROFILE_PLACEHOLDER),
                overlay_label: labels::PROFILE_OVERLAY,
                alt: profile_preview.map(|_| labels::PROFILE_ALT),
                accept: image::ACCEPT,
            },
            hint: labels::IMAGE_HINT,
        }
    }
}

fn tile_content(preview: Option<&str>, placeholder: &'static str) -> TileContent {
    match preview {
        Some(url) => TileContent::Preview(url.to_string()),
        None => TileContent::Placeholder(placeholder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedChooser;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Picked(String, ImageKind),
    }

    fn picker(chooser: ScriptedChooser) -> ImagePicker<Msg> {
        ImagePicker::new(Rc::new(chooser))
            .on_select(|(file, kind): (ImageFile, ImageKind)| Msg::Picked(file.name().to_string(), kind))
    }

    #[test]
    fn test_click_and_enter_open_chooser() {
        assert!(TileEvent::Click.opens_chooser());
        assert!(TileEvent::KeyDown(Key::Enter).opens_chooser());
        assert!(!TileEvent::KeyDown(Key::Space).opens_chooser());
        assert!(!TileEvent::KeyDown(Key::Char('a')).opens_chooser());
    }

    #[test]
    fn test_open_emits_chosen_file() {
        let chooser = ScriptedChooser::new();
        chooser.push(Some(ImageFile::new("bg.png", "image/png", vec![1])));
        let picker = picker(chooser.clone());

        let msg = pollster::block_on(picker.open(ImageKind::Background));
        assert_eq!(msg, Some(Msg::Picked("bg.png".to_string(), ImageKind::Background)));
        assert_eq!(chooser.requests(), vec![ImageKind::Background]);
    }

    #[test]
    fn test_dismissed_dialog_emits_nothing() {
        let chooser = ScriptedChooser::new();
        chooser.push(None);
        let picker = picker(chooser);
        assert_eq!(pollster::block_on(picker.open(ImageKind::Profile)), None);
    }

    #[test]
    fn test_picker_does_not_validate() {
        let picker = picker(ScriptedChooser::new());
        let text = ImageFile::new("notes.txt", "text/plain", b"hi".to_vec());
        assert_eq!(
            picker.file_chosen(Some(text), ImageKind::Profile),
            Some(Msg::Picked("notes.txt".to_string(), ImageKind::Profile))
        );
    }

    #[test]
    fn test_view_placeholders_and_previews() {
        let picker = picker(ScriptedChooser::new());

        let empty = picker.view(None, None);
        assert_eq!(empty.profile.content, TileContent::Placeholder(labels::PROFILE_PLACEHOLDER));
        assert_eq!(empty.background.content, TileContent::Placeholder(labels::BACKGROUND_PLACEHOLDER));
        assert_eq!(empty.profile.alt, None);
        assert_eq!(empty.profile.accept, "image/*");

        let filled = picker.view(Some("https://cdn/p.png"), Some("data:image/png;base64,AA=="));
        assert_eq!(filled.profile.content, TileContent::Preview("https://cdn/p.png".to_string()));
        assert_eq!(
            filled.background.content,
            TileContent::Preview("data:image/png;base64,AA==".to_string())
        );
        assert_eq!(filled.profile.alt, Some(labels::PROFILE_ALT));
        assert_eq!(filled.background.overlay_label, labels::BACKGROUND_OVERLAY);
    }
}
