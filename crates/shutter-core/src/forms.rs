//! Form payloads and client-side validation.
//!
//! Validation runs before any request is sent; a violating form never
//! reaches the server. Messages are attached to the offending field.

use crate::error::{Error, Result};
use crate::ids::{AlbumId, PhotoId};

pub const MAX_TITLE_LEN: usize = 255;
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;

/// Constraints applied to an uploaded image file.
#[derive(Debug, Clone)]
pub struct FileConstraints {
    pub allowed_extensions: Vec<String>,
    pub max_file_size_mb: u64,
}

impl Default for FileConstraints {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl FileConstraints {
    pub fn new(allowed_extensions: &[&str], max_file_size_mb: u64) -> Self {
        Self {
            allowed_extensions: allowed_extensions.iter().map(|s| s.to_string()).collect(),
            max_file_size_mb,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

/// An image file staged for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lowercased text after the final dot, empty when there is none.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .unwrap_or("")
            .to_lowercase()
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self, constraints: &FileConstraints) -> Result<()> {
        if !constraints
            .allowed_extensions
            .iter()
            .any(|allowed| *allowed == self.extension())
        {
            return Err(Error::validation(
                "file",
                format!(
                    "file type .{} is not allowed (expected one of: {})",
                    self.extension(),
                    constraints.allowed_extensions.join(", ")
                ),
            ));
        }
        if self.size() > constraints.max_bytes() {
            return Err(Error::validation(
                "file",
                format!(
                    "file size exceeds the maximum of {} MB",
                    constraints.max_file_size_mb
                ),
            ));
        }
        Ok(())
    }
}

/// Payload for the create-photo mutation.
#[derive(Debug, Clone)]
pub struct NewPhotoForm {
    pub title: String,
    pub file: Option<ImageFile>,
    pub album_ids: Vec<AlbumId>,
}

impl NewPhotoForm {
    pub fn validate(&self, constraints: &FileConstraints) -> Result<()> {
        validate_title(&self.title)?;
        match &self.file {
            None => Err(Error::validation("file", "a file is required")),
            Some(file) => file.validate(constraints),
        }
    }
}

/// Payload for the create-album mutation.
#[derive(Debug, Clone)]
pub struct NewAlbumForm {
    pub title: String,
    pub photo_ids: Vec<PhotoId>,
}

impl NewAlbumForm {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::validation("title", "a title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::validation(
            "title",
            format!("title exceeds {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}
