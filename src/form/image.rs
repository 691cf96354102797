//! Image selection: file handles, validation, previews and pending reads.

use std::fmt;
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use profile_api::UploadFile;
use serde::Serialize;
use thiserror::Error;

use crate::constants::image::{CONTENT_TYPE_PREFIX, DATA_URI_PREFIX, EXTENSIONS, MAX_BYTES};

/// Which of the two image tiles an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Profile,
    Background,
}

impl ImageKind {
    pub fn name(self) -> &'static str {
        match self {
            ImageKind::Profile => "profile",
            ImageKind::Background => "background",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A file the user picked, with its declared content type.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    content_type: String,
    bytes: Rc<[u8]>,
}

impl ImageFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: Rc::from(bytes),
        }
    }

    /// Build a file whose content type is inferred from its bytes and name.
    pub fn from_named_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = sniff_content_type(&name, &bytes);
        Self::new(name, content_type, bytes)
    }

    /// Read a file from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_named_bytes(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the declared content type names an image.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with(CONTENT_TYPE_PREFIX)
    }

    /// Inline `data:` URI of the file contents.
    pub fn to_data_uri(&self) -> String {
        format!(
            "{}{};base64,{}",
            DATA_URI_PREFIX,
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }

    /// Copy into the multipart payload for the upload endpoint.
    pub fn to_upload(&self) -> UploadFile {
        UploadFile {
            file_name: self.name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.to_vec(),
        }
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Guess a content type from magic bytes, then from the file extension.
pub fn sniff_content_type(name: &str, data: &[u8]) -> String {
    let sniffed = if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    };

    if let Some(content_type) = sniffed {
        return content_type.to_string();
    }

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Whether a file name carries one of the extensions the chooser offers.
pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Whether a preview is a local, not-yet-uploaded encoding.
pub fn is_data_uri(preview: &str) -> bool {
    preview.starts_with(DATA_URI_PREFIX)
}

/// Reasons a selected file is refused before it is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageRejection {
    #[error("No file was selected")]
    Missing,

    #[error("Only image files can be selected")]
    NotAnImage { content_type: String },

    #[error("The file must be 2 MB or smaller")]
    TooLarge { size: usize, max: usize },
}

/// Synchronous checks run on every selection.
pub fn check_selection(file: Option<ImageFile>) -> Result<ImageFile, ImageRejection> {
    let file = file.ok_or(ImageRejection::Missing)?;

    if !file.is_image() {
        return Err(ImageRejection::NotAnImage {
            content_type: file.content_type().to_string(),
        });
    }

    if file.size() > MAX_BYTES {
        return Err(ImageRejection::TooLarge {
            size: file.size(),
            max: MAX_BYTES,
        });
    }

    Ok(file)
}

/// Preview and pending upload for one tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    /// Server URL or local `data:` URI currently shown
    pub preview: Option<String>,
    /// Selected file awaiting upload
    pub pending: Option<ImageFile>,
    /// Bumped on every accepted selection; reads from older selections are stale
    pub generation: u64,
}

impl ImageSlot {
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn pending(&self) -> Option<&ImageFile> {
        self.pending.as_ref()
    }
}

/// An accepted selection whose contents still have to be read.
#[derive(Debug, Clone)]
pub struct PendingRead {
    pub kind: ImageKind,
    pub generation: u64,
    pub file: ImageFile,
}

impl PendingRead {
    /// Encode the file into a preview.
    pub async fn read(self) -> LoadedImage {
        let data_uri = self.file.to_data_uri();
        log::debug!(
            "Read {} image '{}' ({} bytes)",
            self.kind,
            self.file.name(),
            self.file.size()
        );
        LoadedImage {
            kind: self.kind,
            generation: self.generation,
            data_uri,
            file: self.file,
        }
    }
}

/// A finished read, ready to become the slot's preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub kind: ImageKind,
    pub generation: u64,
    pub data_uri: String,
    pub file: ImageFile,
}
