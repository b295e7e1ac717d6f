use common::config::{ConfigManager, FileContentConfigProvider, GameConfig, Validate, YamlConfigSerializer};
use common::frame::FrameContext;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_frame_config.yaml";

pub const MIN_CELL_PIXELS: f32 = 8.0;
pub const MAX_CELL_PIXELS: f32 = 64.0;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: GameConfig,
    #[serde(default)]
    pub frame: FrameContext,
    pub cell_pixels: f32,
}

impl Config {
    /// Window size needed to show the whole board plus the frame's safe area.
    pub fn window_size(&self) -> [f32; 2] {
        let board = self.game.grid_size as f32 * self.cell_pixels;
        let (pad_x, pad_y) = self.frame.padding();
        [board + pad_x + 32.0, board + pad_y + 140.0]
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.frame.validate()?;
        if !(MIN_CELL_PIXELS..=MAX_CELL_PIXELS).contains(&self.cell_pixels) {
            return Err(format!(
                "cell_pixels must be between {} and {}",
                MIN_CELL_PIXELS, MAX_CELL_PIXELS
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            frame: FrameContext::default(),
            cell_pixels: 24.0,
        }
    }
}
