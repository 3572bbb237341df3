//! HTTP behavior tests for the gallery API client.

use shutter_api::{ApiClient, ApiConfig};
use shutter_core::Error;
use shutter_core::filters::FilterState;
use shutter_core::forms::ImageFile;
use shutter_core::ids::{AlbumId, PhotoId};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&ApiConfig::new(server.uri())).expect("client")
}

#[tokio::test]
async fn list_photos_sends_canonical_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("q", "beach"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "p1", "title": "Low tide", "imageId": "img1", "albumIds": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let filters = FilterState::new(None, Some("beach".into()));
    let photos = client.list_photos(&filters).await.unwrap();

    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].title, "Low tide");
}

#[tokio::test]
async fn list_photos_unfiltered_hits_bare_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let photos = client.list_photos(&FilterState::default()).await.unwrap();
    assert!(photos.is_empty());
}

#[tokio::test]
async fn get_photo_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_photo(&PhotoId::new("missing")).await.unwrap_err();
    assert!(matches!(err, Error::PhotoNotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn get_photo_decodes_adjacency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc", "title": "Dunes", "imageId": "img1", "albumIds": [],
            "previousPhotoId": "xyz"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detail = client.get_photo(&PhotoId::new("abc")).await.unwrap();
    assert_eq!(detail.previous_photo_id, Some(PhotoId::new("xyz")));
    assert_eq!(detail.next_photo_id, None);
}

#[tokio::test]
async fn create_photo_posts_title_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/photos"))
        .and(body_json(serde_json::json!({"title": "Dunes"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p9", "title": "Dunes"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let photo = client.create_photo("Dunes").await.unwrap();
    assert_eq!(photo.id, PhotoId::new("p9"));
}

#[tokio::test]
async fn upload_photo_image_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/photos/p9/image"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let file = ImageFile::new("dunes.png", vec![0u8; 16]);
    client
        .upload_photo_image(&PhotoId::new("p9"), &file)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn set_photo_albums_puts_ids() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/photos/p1/albums"))
        .and(body_json(serde_json::json!({"albumsIds": ["a1", "a2"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .set_photo_albums(
            &PhotoId::new("p1"),
            &[AlbumId::new("a1"), AlbumId::new("a2")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_photo_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/photos/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.delete_photo(&PhotoId::new("p1")).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }));
}

#[tokio::test]
async fn create_album_omits_empty_photo_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/albums"))
        .and(body_json(serde_json::json!({"title": "Trips"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "a7", "title": "Trips"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let album = client.create_album("Trips", &[]).await.unwrap();
    assert_eq!(album.id, AlbumId::new("a7"));
}

#[tokio::test]
async fn malformed_body_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_albums().await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
