//! Gallery API client.

use crate::config::ApiConfig;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shutter_core::filters::FilterState;
use shutter_core::forms::ImageFile;
use shutter_core::ids::{AlbumId, PhotoId};
use shutter_core::models::{Album, Photo, PhotoDetail};
use shutter_core::{Error, Result};
use tracing::debug;

#[derive(Debug, Serialize)]
struct CreatePhotoRequest<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetPhotoAlbumsRequest<'a> {
    albums_ids: &'a [AlbumId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAlbumRequest<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    photos_ids: &'a [PhotoId],
}

/// HTTP client for the gallery API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// `GET /photos?albumId=&q=`: the filtered, ordered photo list.
    pub async fn list_photos(&self, filters: &FilterState) -> Result<Vec<Photo>> {
        let path = format!("/photos{}", filters.to_query_string());
        debug!(%path, "Fetching photo list");
        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => self.decode(response).await,
            status => Err(http_error(status, response).await),
        }
    }

    /// `GET /photos/{id}`: detail plus previous/next adjacency.
    pub async fn get_photo(&self, id: &PhotoId) -> Result<PhotoDetail> {
        let response = self
            .request(Method::GET, &format!("/photos/{id}"))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => self.decode(response).await,
            StatusCode::NOT_FOUND => Err(Error::PhotoNotFound(id.to_string())),
            status => Err(http_error(status, response).await),
        }
    }

    /// `POST /photos`: create the photo record (no image yet).
    pub async fn create_photo(&self, title: &str) -> Result<Photo> {
        let response = self
            .request(Method::POST, "/photos")
            .json(&CreatePhotoRequest { title })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => self.decode(response).await,
            status => Err(http_error(status, response).await),
        }
    }

    /// `POST /photos/{id}/image`: attach the image as multipart form data.
    pub async fn upload_photo_image(&self, id: &PhotoId, file: &ImageFile) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        debug!(photo_id = %id, file = %file.file_name, size = file.size(), "Uploading image");
        let response = self
            .request(Method::POST, &format!("/photos/{id}/image"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::PhotoNotFound(id.to_string())),
            status => Err(http_error(status, response).await),
        }
    }

    /// `PUT /photos/{id}/albums`: replace the photo's album associations.
    pub async fn set_photo_albums(&self, id: &PhotoId, album_ids: &[AlbumId]) -> Result<()> {
        let response = self
            .request(Method::PUT, &format!("/photos/{id}/albums"))
            .json(&SetPhotoAlbumsRequest {
                albums_ids: album_ids,
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::PhotoNotFound(id.to_string())),
            status => Err(http_error(status, response).await),
        }
    }

    /// `DELETE /photos/{id}`.
    pub async fn delete_photo(&self, id: &PhotoId) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/photos/{id}"))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(Error::PhotoNotFound(id.to_string())),
            status => Err(http_error(status, response).await),
        }
    }

    /// `GET /albums`.
    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        let response = self
            .request(Method::GET, "/albums")
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => self.decode(response).await,
            status => Err(http_error(status, response).await),
        }
    }

    /// `POST /albums`.
    pub async fn create_album(&self, title: &str, photo_ids: &[PhotoId]) -> Result<Album> {
        let response = self
            .request(Method::POST, "/albums")
            .json(&CreateAlbumRequest {
                title,
                photos_ids: photo_ids,
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => self.decode(response).await,
            status => Err(http_error(status, response).await),
        }
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

async fn http_error(status: StatusCode, response: reqwest::Response) -> Error {
    let message = response.text().await.unwrap_or_default();
    Error::Http {
        status: status.as_u16(),
        message,
    }
}
