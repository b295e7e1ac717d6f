mod broadcaster;
mod config;
mod state;
mod ui;

use clap::Parser;
use common::config::{GamePreset, Validate};
use common::games::SessionRng;
use common::games::snake::SnakeSessionSettings;
use common::{SnakeSession, log, logger};
use eframe::egui;

use broadcaster::LocalBroadcaster;
use config::{Config, get_config_manager};
use state::SharedState;
use ui::FrameApp;

#[derive(Parser)]
#[command(name = "snake_frame")]
struct Args {
    /// Config file; defaults to snake_frame_config.yaml next to the executable.
    #[arg(long)]
    config: Option<String>,

    /// Overrides the game section of the config file.
    #[arg(long)]
    preset: Option<GamePreset>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<Config, String> {
    let mut config: Config = match &args.config {
        Some(path) => common::config::ConfigManager::from_yaml_file(path).get_config()?,
        None => get_config_manager().get_or_create_config()?,
    };
    if let Some(preset) = args.preset {
        config.game = preset.config();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Frame".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config = load_config(&args)?;
    let preset_name = args
        .preset
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| "custom".to_string());
    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting {} game with seed {}", preset_name, rng.seed());

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let shared_state = SharedState::new();
    let settings = SnakeSessionSettings::try_from(&config.game)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake Frame",
        options,
        Box::new(move |cc| {
            let broadcaster = LocalBroadcaster::new(shared_state.clone(), cc.egui_ctx.clone());
            let session = SnakeSession::spawn(settings, rng, broadcaster);
            Ok(Box::new(FrameApp::new(session, shared_state, config, preset_name)))
        }),
    )?;

    log!("Frame closed");
    Ok(())
}
