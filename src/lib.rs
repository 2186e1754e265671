pub mod algo;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod ops;
pub mod service;

#[cfg(feature = "mcp")]
pub mod mcp;

#[cfg(feature = "plugin")]
pub mod commands;

pub use catalog::{Catalog, Song};
pub use config::{ColumnNames, RecommenderConfig};
pub use error::{IngestError, LexiconError, NotFound};
pub use ingest::SongRecord;
pub use service::{Recommender, ScoredSong};

#[cfg(feature = "plugin")]
use nu_plugin::{Plugin, PluginCommand};

#[cfg(feature = "plugin")]
pub struct SongrecPlugin;

#[cfg(feature = "plugin")]
impl Plugin for SongrecPlugin {
    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").into()
    }

    fn commands(&self) -> Vec<Box<dyn PluginCommand<Plugin = Self>>> {
        vec![
            Box::new(commands::SongCmd),
            Box::new(commands::ArtistCmd),
            Box::new(commands::MoodCmd),
            Box::new(commands::Classify),
        ]
    }
}
