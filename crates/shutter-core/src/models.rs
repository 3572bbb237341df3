//! Wire models for the gallery API.

use crate::ids::{AlbumId, ImageId, PhotoId};
use serde::{Deserialize, Serialize};

/// A photo summary as returned by `GET /photos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    #[serde(default)]
    pub image_id: Option<ImageId>,
    #[serde(default)]
    pub album_ids: Vec<AlbumId>,
}

/// Photo detail plus the list adjacency the server computes for
/// previous/next navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDetail {
    #[serde(flatten)]
    pub photo: Photo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_photo_id: Option<PhotoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_photo_id: Option<PhotoId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
}
