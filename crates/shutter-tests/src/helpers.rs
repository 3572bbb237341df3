//! Test helper functions and utilities.

use shutter_api::{ApiClient, ApiConfig};
use shutter_core::filters::FilterState;
use shutter_core::notify::BufferingNotifier;
use shutter_mutations::MutationPipeline;
use shutter_query::QueryCache;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Everything a pipeline scenario needs, wired against one mock server.
pub struct TestApp {
    pub server: MockServer,
    pub api: Arc<ApiClient>,
    pub cache: QueryCache,
    pub pipeline: MutationPipeline,
    pub notifier: Arc<BufferingNotifier>,
}

/// Start a mock gallery server and a fully wired pipeline around it.
pub async fn test_app() -> TestApp {
    let server = MockServer::start().await;
    let api = Arc::new(ApiClient::new(&ApiConfig::new(server.uri())).expect("api client"));
    let cache = QueryCache::new();
    let notifier = Arc::new(BufferingNotifier::new());
    let pipeline = MutationPipeline::new(
        Arc::clone(&api),
        cache.clone(),
        Arc::clone(&notifier) as Arc<dyn shutter_core::notify::Notifier>,
    );
    TestApp {
        server,
        api,
        cache,
        pipeline,
        notifier,
    }
}

/// Mount `GET /photos` for one exact filter combination.
pub async fn mount_photo_list(
    server: &MockServer,
    filters: &FilterState,
    photos: serde_json::Value,
) {
    let mut mock = Mock::given(method("GET")).and(path("/photos"));
    mock = match &filters.album_id {
        Some(album_id) => mock.and(query_param("albumId", album_id.clone())),
        None => mock.and(query_param_is_missing("albumId")),
    };
    mock = match &filters.q {
        Some(q) => mock.and(query_param("q", q.clone())),
        None => mock.and(query_param_is_missing("q")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(photos))
        .mount(server)
        .await;
}

/// A fetch closure for the photo list under `filters`, suitable for
/// `QueryCache::subscribe`.
pub fn photo_list_fetch(
    api: Arc<ApiClient>,
    filters: FilterState,
) -> impl Fn() -> futures::future::BoxFuture<'static, shutter_core::Result<serde_json::Value>>
+ Send
+ Sync
+ 'static {
    move || {
        let api = Arc::clone(&api);
        let filters = filters.clone();
        Box::pin(async move {
            let photos = api.list_photos(&filters).await?;
            Ok(serde_json::to_value(photos)?)
        })
    }
}

/// Count requests the server has seen for `GET /photos` (any filters).
pub async fn photo_list_request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/photos")
        .count()
}
