mod content_provider;
mod game_config;
mod manager;
mod serializer;
mod validate;

pub use content_provider::{ConfigContentProvider, FileContentConfigProvider, InMemoryContentProvider};
pub use game_config::{GameConfig, GamePreset};
pub use manager::ConfigManager;
pub use serializer::{ConfigSerializer, YamlConfigSerializer};
pub use validate::Validate;
