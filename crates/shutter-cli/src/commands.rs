//! CLI command definitions.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and manage photos.
    Photos {
        #[command(subcommand)]
        command: PhotoCommands,
    },
    /// Browse and manage albums.
    Albums {
        #[command(subcommand)]
        command: AlbumCommands,
    },
    /// Show or change CLI configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum PhotoCommands {
    /// List photos, optionally filtered by album and free-text query.
    List {
        /// Only photos in this album.
        #[arg(long)]
        album: Option<String>,
        /// Free-text title filter.
        #[arg(long)]
        q: Option<String>,
        /// Print a shareable URL for the current filters.
        #[arg(long)]
        share_url: bool,
    },
    /// Show one photo with previous/next navigation.
    Show { id: String },
    /// Create a photo from a local image file.
    Create {
        #[arg(long)]
        title: String,
        /// Path to the image file to upload.
        #[arg(long)]
        file: PathBuf,
        /// Album id to associate; repeatable.
        #[arg(long = "album")]
        albums: Vec<String>,
    },
    /// Delete a photo.
    Delete { id: String },
    /// Replace a photo's album associations.
    SetAlbums {
        id: String,
        /// Album id; repeatable. No flags clears all associations.
        #[arg(long = "album")]
        albums: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum AlbumCommands {
    /// List albums.
    List,
    /// Create an album.
    Create {
        #[arg(long)]
        title: String,
        /// Photo id to include; repeatable.
        #[arg(long = "photo")]
        photos: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the active configuration.
    Show,
    /// Set a configuration value.
    Set { key: String, value: String },
}
