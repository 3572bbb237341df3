//! CLI command handlers.

use crate::config::{CliConfig, OutputFormat};
use crate::notifier::ConsoleNotifier;
use anyhow::Context;
use console::style;
use shutter_api::{ApiClient, ApiConfig};
use shutter_core::filters::{FilterName, FilterState};
use shutter_core::forms::{FileConstraints, ImageFile, NewAlbumForm, NewPhotoForm};
use shutter_core::ids::{AlbumId, PhotoId};
use shutter_core::keys::QueryKey;
use shutter_core::models::{Album, Photo, PhotoDetail};
use shutter_mutations::MutationPipeline;
use shutter_query::QueryCache;
use shutter_ui::{ListViewState, PhotoListView, PhotoNavigator, UrlFilterStore};
use std::path::Path;
use std::sync::Arc;

struct App {
    api: Arc<ApiClient>,
    cache: QueryCache,
    pipeline: MutationPipeline,
}

fn app(config: &CliConfig) -> anyhow::Result<App> {
    tracing::debug!(api_url = %config.api_url, "wiring client stack");
    let api = Arc::new(ApiClient::new(&ApiConfig::new(&config.api_url))?);
    let cache = QueryCache::new();
    let constraints = FileConstraints {
        max_file_size_mb: config.max_file_size_mb,
        ..FileConstraints::default()
    };
    let pipeline = MutationPipeline::new(Arc::clone(&api), cache.clone(), Arc::new(ConsoleNotifier))
        .with_file_constraints(constraints);
    Ok(App {
        api,
        cache,
        pipeline,
    })
}

pub async fn list_photos(
    config: &CliConfig,
    album: Option<String>,
    q: Option<String>,
    share_url: bool,
) -> anyhow::Result<()> {
    let app = app(config)?;

    let store = UrlFilterStore::new();
    store.set(FilterName::AlbumId, album);
    store.set(FilterName::Query, q);
    let filters = store.state();

    let mut view = PhotoListView::new(app.cache.clone(), Arc::clone(&app.api));
    view.bind(&filters);

    match view.settled().await {
        ListViewState::Loading => unreachable!("settled never returns loading"),
        ListViewState::Empty => println!("{}", style("No photos found.").dim()),
        ListViewState::Populated(photos) => render_photos(&photos, config.output_format)?,
        ListViewState::Failed(message) => {
            eprintln!("{} {message}", style("✘").red().bold());
            anyhow::bail!("photo list failed");
        }
    }

    if share_url {
        println!("\n{} {}", style("Share:").bold(), store.href());
    }
    Ok(())
}

pub async fn show_photo(config: &CliConfig, id: &str) -> anyhow::Result<()> {
    let app = app(config)?;
    let photo_id = PhotoId::new(id);

    let key = QueryKey::photo(&photo_id);
    let api = Arc::clone(&app.api);
    let fetch_id = photo_id.clone();
    let mut sub = app.cache.subscribe(key, move || {
        let api = Arc::clone(&api);
        let id = fetch_id.clone();
        async move {
            let detail = api.get_photo(&id).await?;
            Ok(serde_json::to_value(detail)?)
        }
    });

    let snapshot = sub.settled().await;
    if let Some(error) = &snapshot.error {
        eprintln!("{} {}", style("✘").red().bold(), error.message);
        anyhow::bail!("photo detail failed");
    }
    let detail: PhotoDetail = snapshot
        .decode()?
        .context("photo detail settled without data")?;

    println!("{} {}", style(&detail.photo.title).bold(), detail.photo.id);
    if !detail.photo.album_ids.is_empty() {
        let albums: Vec<&str> = detail.photo.album_ids.iter().map(AlbumId::as_str).collect();
        println!("Albums: {}", albums.join(", "));
    }

    let navigator = PhotoNavigator::from_detail(&detail);
    let previous = match navigator.previous() {
        Some(id) => style(format!("← {id}")).cyan().to_string(),
        None => style("← (none)").dim().to_string(),
    };
    let next = match navigator.next() {
        Some(id) => style(format!("{id} →")).cyan().to_string(),
        None => style("(none) →").dim().to_string(),
    };
    println!("{previous}  |  {next}");
    Ok(())
}

pub async fn create_photo(
    config: &CliConfig,
    title: &str,
    file: &Path,
    albums: Vec<String>,
) -> anyhow::Result<()> {
    let app = app(config)?;

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file path has no usable file name")?
        .to_string();
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let form = NewPhotoForm {
        title: title.to_string(),
        file: Some(ImageFile::new(file_name, bytes)),
        album_ids: albums.into_iter().map(AlbumId::new).collect(),
    };

    let photo = app.pipeline.create_photo(&form).await?;
    println!("{}", photo.id);
    Ok(())
}

pub async fn delete_photo(config: &CliConfig, id: &str) -> anyhow::Result<()> {
    let app = app(config)?;
    app.pipeline.delete_photo(&PhotoId::new(id)).await?;
    Ok(())
}

pub async fn set_photo_albums(
    config: &CliConfig,
    id: &str,
    albums: Vec<String>,
) -> anyhow::Result<()> {
    let app = app(config)?;
    let album_ids: Vec<AlbumId> = albums.into_iter().map(AlbumId::new).collect();
    app.pipeline
        .set_photo_albums(&PhotoId::new(id), &album_ids)
        .await?;
    Ok(())
}

pub async fn list_albums(config: &CliConfig) -> anyhow::Result<()> {
    let app = app(config)?;

    let api = Arc::clone(&app.api);
    let mut sub = app.cache.subscribe(QueryKey::albums(), move || {
        let api = Arc::clone(&api);
        async move {
            let albums = api.list_albums().await?;
            Ok(serde_json::to_value(albums)?)
        }
    });

    let snapshot = sub.settled().await;
    if let Some(error) = &snapshot.error {
        eprintln!("{} {}", style("✘").red().bold(), error.message);
        anyhow::bail!("album list failed");
    }
    let albums: Vec<Album> = snapshot.decode()?.unwrap_or_default();
    if albums.is_empty() {
        println!("{}", style("No albums yet.").dim());
        return Ok(());
    }
    render_albums(&albums, config.output_format)?;
    Ok(())
}

pub async fn create_album(
    config: &CliConfig,
    title: &str,
    photos: Vec<String>,
) -> anyhow::Result<()> {
    let app = app(config)?;
    let form = NewAlbumForm {
        title: title.to_string(),
        photo_ids: photos.into_iter().map(PhotoId::new).collect(),
    };
    let album = app.pipeline.create_album(&form).await?;
    println!("{}", album.id);
    Ok(())
}

pub fn show_config(config: &CliConfig) -> anyhow::Result<()> {
    let rendered = serde_yaml::to_string(config)?;
    print!("{rendered}");
    Ok(())
}

pub fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = CliConfig::load().unwrap_or_default();
    config
        .set(key, value)
        .map_err(|message| anyhow::anyhow!(message))?;
    config.save().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!("{key} = {value}");
    Ok(())
}

fn render_photos(photos: &[Photo], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(photos)?),
        OutputFormat::Table => {
            for photo in photos {
                let albums = if photo.album_ids.is_empty() {
                    style("-".to_string()).dim().to_string()
                } else {
                    photo
                        .album_ids
                        .iter()
                        .map(AlbumId::as_str)
                        .collect::<Vec<_>>()
                        .join(",")
                };
                println!("{}  {}  {}", photo.id, style(&photo.title).bold(), albums);
            }
        }
    }
    Ok(())
}

fn render_albums(albums: &[Album], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(albums)?),
        OutputFormat::Table => {
            for album in albums {
                println!("{}  {}", album.id, style(&album.title).bold());
            }
        }
    }
    Ok(())
}
