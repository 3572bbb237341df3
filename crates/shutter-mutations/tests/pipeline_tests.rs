//! Mutation pipeline behavior against a mock gallery server.

use shutter_api::{ApiClient, ApiConfig};
use shutter_core::Error;
use shutter_core::filters::FilterState;
use shutter_core::forms::{FileConstraints, ImageFile, NewAlbumForm, NewPhotoForm};
use shutter_core::ids::{AlbumId, PhotoId};
use shutter_core::keys::QueryKey;
use shutter_core::notify::{BufferingNotifier, NotificationKind};
use shutter_mutations::MutationPipeline;
use shutter_query::{QueryCache, QueryStatus};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    pipeline: MutationPipeline,
    cache: QueryCache,
    notifier: Arc<BufferingNotifier>,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let api = Arc::new(ApiClient::new(&ApiConfig::new(server.uri())).expect("client"));
    let cache = QueryCache::new();
    let notifier = Arc::new(BufferingNotifier::new());
    let pipeline = MutationPipeline::new(
        api,
        cache.clone(),
        Arc::clone(&notifier) as Arc<dyn shutter_core::notify::Notifier>,
    );
    Harness {
        server,
        pipeline,
        cache,
        notifier,
    }
}

fn photo_form() -> NewPhotoForm {
    NewPhotoForm {
        title: "Dunes".into(),
        file: Some(ImageFile::new("dunes.png", vec![0u8; 64])),
        album_ids: vec![AlbumId::new("a1")],
    }
}

#[tokio::test]
async fn create_photo_runs_three_calls_in_order() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p1", "title": "Dunes"
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/photos/p1/image"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/photos/p1/albums"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let photo = h.pipeline.create_photo(&photo_form()).await.unwrap();
    assert_eq!(photo.id, PhotoId::new("p1"));

    let requests = h.server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths, ["/photos", "/photos/p1/image", "/photos/p1/albums"]);

    let notifications = h.notifier.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn create_photo_skips_album_call_when_none_selected() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p1", "title": "Dunes"
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/photos/p1/image"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    let mut form = photo_form();
    form.album_ids.clear();
    h.pipeline.create_photo(&form).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn oversized_file_is_rejected_before_any_request() {
    let h = harness().await;
    let pipeline = h
        .pipeline
        .with_file_constraints(FileConstraints::new(&["png", "jpg"], 50));

    let mut form = photo_form();
    form.file = Some(ImageFile::new("huge.png", vec![0u8; 60 * 1024 * 1024]));

    let err = pipeline.create_photo(&form).await.unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, ref message }
        if field == "file" && message.contains("maximum")));

    // Nothing was sent and no toast fired; the error surfaces at the field.
    assert!(h.server.received_requests().await.unwrap().is_empty());
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn failed_upload_keeps_record_and_reports_error() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "p1", "title": "Dunes"
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/photos/p1/image"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.pipeline.create_photo(&photo_form()).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }));

    // Two calls went out, the album step never ran.
    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let notifications = h.notifier.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn delete_photo_invalidates_the_photos_prefix() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "p1", "title": "Dunes"}
        ])))
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/photos/p1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    // Populate a cached photo list, then release the subscription.
    let key = QueryKey::photos(&FilterState::default());
    let api = Arc::new(ApiClient::new(&ApiConfig::new(h.server.uri())).unwrap());
    let fetch_api = Arc::clone(&api);
    let mut sub = h.cache.subscribe(key.clone(), move || {
        let api = Arc::clone(&fetch_api);
        async move {
            let photos = api.list_photos(&FilterState::default()).await?;
            Ok(serde_json::to_value(photos)?)
        }
    });
    assert_eq!(sub.settled().await.status, QueryStatus::Success);

    h.pipeline.delete_photo(&PhotoId::new("p1")).await.unwrap();

    // The live subscription refetches and settles again.
    let refreshed = sub.settled().await;
    assert_eq!(refreshed.status, QueryStatus::Success);

    let list_calls = h
        .server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/photos")
        .count();
    assert_eq!(list_calls, 2);
}

#[tokio::test]
async fn set_photo_albums_refetches_a_subscribed_detail_exactly_once() {
    let h = harness().await;
    Mock::given(method("GET"))
        .and(path("/photos/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "p1", "title": "Dunes"
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/photos/p1/albums"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    let photo_id = PhotoId::new("p1");
    let api = Arc::new(ApiClient::new(&ApiConfig::new(h.server.uri())).unwrap());
    let fetch_id = photo_id.clone();
    let mut sub = h.cache.subscribe(QueryKey::photo(&photo_id), move || {
        let api = Arc::clone(&api);
        let id = fetch_id.clone();
        async move {
            let detail = api.get_photo(&id).await?;
            Ok(serde_json::to_value(detail)?)
        }
    });
    assert_eq!(sub.settled().await.status, QueryStatus::Success);

    h.pipeline
        .set_photo_albums(&photo_id, &[AlbumId::new("a1")])
        .await
        .unwrap();
    assert_eq!(sub.settled().await.status, QueryStatus::Success);

    // One initial fetch plus one refresh after the mutation, nothing more.
    let detail_calls = h
        .server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/photos/p1")
        .count();
    assert_eq!(detail_calls, 2);

    let notifications = h.notifier.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn create_album_notifies_and_invalidates_albums() {
    let h = harness().await;
    Mock::given(method("POST"))
        .and(path("/albums"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "a1", "title": "Trips"
        })))
        .mount(&h.server)
        .await;

    let album = h
        .pipeline
        .create_album(&NewAlbumForm {
            title: "Trips".into(),
            photo_ids: vec![],
        })
        .await
        .unwrap();
    assert_eq!(album.id, AlbumId::new("a1"));
    assert_eq!(h.notifier.len(), 1);
}

#[tokio::test]
async fn failed_delete_notifies_error_and_rethrows() {
    let h = harness().await;
    Mock::given(method("DELETE"))
        .and(path("/photos/p1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let err = h.pipeline.delete_photo(&PhotoId::new("p1")).await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500, .. }));

    let notifications = h.notifier.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
}
