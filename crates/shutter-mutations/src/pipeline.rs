//! The mutation pipeline.

use shutter_api::ApiClient;
use shutter_core::forms::{FileConstraints, NewAlbumForm, NewPhotoForm};
use shutter_core::ids::{AlbumId, PhotoId};
use shutter_core::keys::{QueryKey, RESOURCE_PHOTOS};
use shutter_core::models::{Album, Photo};
use shutter_core::notify::{Notification, Notifier};
use shutter_core::{Error, Result};
use shutter_query::QueryCache;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs mutations and keeps the query cache coherent afterwards.
pub struct MutationPipeline {
    api: Arc<ApiClient>,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
    file_constraints: FileConstraints,
}

impl MutationPipeline {
    pub fn new(api: Arc<ApiClient>, cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            cache,
            notifier,
            file_constraints: FileConstraints::default(),
        }
    }

    pub fn with_file_constraints(mut self, constraints: FileConstraints) -> Self {
        self.file_constraints = constraints;
        self
    }

    /// Create a photo: record, then image upload, then album association,
    /// strictly in that order. The sequence is not transactional: when a
    /// later step fails, earlier steps are not rolled back and the created
    /// record persists on the server without its image.
    pub async fn create_photo(&self, form: &NewPhotoForm) -> Result<Photo> {
        // Validation failures never leave the client.
        form.validate(&self.file_constraints)?;
        let file = form
            .file
            .as_ref()
            .ok_or_else(|| Error::validation("file", "a file is required"))?;

        let photo = match self.api.create_photo(&form.title).await {
            Ok(photo) => photo,
            Err(err) => return Err(self.fail("Failed to create photo", err)),
        };

        if let Err(err) = self.api.upload_photo_image(&photo.id, file).await {
            warn!(photo_id = %photo.id, "Photo record persists without an image");
            return Err(self.fail("Failed to create photo", err));
        }

        if !form.album_ids.is_empty() {
            if let Err(err) = self.api.set_photo_albums(&photo.id, &form.album_ids).await {
                return Err(self.fail("Failed to create photo", err));
            }
        }

        self.cache.invalidate_prefix(&QueryKey::resource(RESOURCE_PHOTOS));
        info!(photo_id = %photo.id, title = %form.title, "Photo created");
        self.notifier.notify(Notification::success("Photo created"));
        Ok(photo)
    }

    pub async fn delete_photo(&self, id: &PhotoId) -> Result<()> {
        if let Err(err) = self.api.delete_photo(id).await {
            return Err(self.fail("Failed to delete photo", err));
        }

        self.cache.invalidate_prefix(&QueryKey::resource(RESOURCE_PHOTOS));
        info!(photo_id = %id, "Photo deleted");
        self.notifier.notify(Notification::success("Photo deleted"));
        Ok(())
    }

    /// Replace a photo's album associations. The photos prefix covers
    /// both the lists and the photo's own detail entry.
    pub async fn set_photo_albums(&self, id: &PhotoId, album_ids: &[AlbumId]) -> Result<()> {
        if let Err(err) = self.api.set_photo_albums(id, album_ids).await {
            return Err(self.fail("Failed to update the photo's albums", err));
        }

        self.cache.invalidate_prefix(&QueryKey::resource(RESOURCE_PHOTOS));
        info!(photo_id = %id, albums = album_ids.len(), "Photo albums updated");
        self.notifier.notify(Notification::success("Albums updated"));
        Ok(())
    }

    pub async fn create_album(&self, form: &NewAlbumForm) -> Result<Album> {
        form.validate()?;

        let album = match self.api.create_album(&form.title, &form.photo_ids).await {
            Ok(album) => album,
            Err(err) => return Err(self.fail("Failed to create album", err)),
        };

        self.cache.invalidate_prefix(&QueryKey::albums());
        info!(album_id = %album.id, title = %form.title, "Album created");
        self.notifier.notify(Notification::success("Album created"));
        Ok(album)
    }

    /// Notify the failure and hand the error back to the caller.
    fn fail(&self, message: &str, err: Error) -> Error {
        warn!(error = %err, "{message}");
        self.notifier
            .notify(Notification::error(format!("{message}: {err}")));
        err
    }
}
