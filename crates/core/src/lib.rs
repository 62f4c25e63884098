pub mod catalog;
pub mod config;
pub mod directory;
pub mod metrics;
pub mod normalize;
pub mod search;
pub mod testing;

pub use catalog::{
    ShowListQuery, ShowRecord, ShowRecordInput, ShowStore, ShowStoreError, SqliteShowStore,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ServerConfig,
};
pub use directory::{
    search_episodes_or_empty, DirectoryError, EpisodeExternal, ItunesClient, ItunesConfig,
    PodcastDirectory, ShowExternal, DEFAULT_SEARCH_LIMIT,
};
pub use search::{EpisodeRecord, SearchError, SearchResult, SearchService};
