//! Gesture mouse control application: tracked hand motion in, pointer actions out.

use anyhow::Result;
use clap::Parser;
use gesture_mouse_control::app::{AppConfig, FrameInput, GestureMouseApp};
use gesture_mouse_control::config::{Config, EXAMPLE_CONFIG};
use gesture_mouse_control::cursor::ControlMode;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replay file with recorded tracking ticks (JSON lines)
    #[arg(short, long)]
    replay: Option<String>,

    /// Interaction mode (disabled, move_only, grip_to_press, hover_to_click,
    /// move_grip_pressing, move_lift_clicking, thumb_buttons_wrist,
    /// thumb_buttons_hand_tip)
    #[arg(short, long)]
    mode: Option<String>,

    /// Pointer sensitivity gain
    #[arg(long)]
    move_scale: Option<f64>,

    /// Exponential smoothing factor (0.0-1.0)
    #[arg(short, long)]
    smoothing: Option<f64>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_example_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Gesture Mouse Control");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(mode) = &args.mode {
        config.mode = match mode.as_str() {
            "disabled" => ControlMode::Disabled,
            "move_only" => ControlMode::MoveOnly,
            "grip_to_press" => ControlMode::GripToPress,
            "hover_to_click" => ControlMode::HoverToClick,
            "move_grip_pressing" => ControlMode::MoveGripPressing,
            "move_lift_clicking" => ControlMode::MoveLiftClicking,
            "thumb_buttons_wrist" => ControlMode::ThumbButtonsWrist,
            "thumb_buttons_hand_tip" => ControlMode::ThumbButtonsHandTip,
            other => anyhow::bail!("Unknown mode: {other}"),
        };
    }
    if let Some(move_scale) = args.move_scale {
        config.mapper.move_scale = move_scale;
    }
    if let Some(smoothing) = args.smoothing {
        config.mapper.smoothing = smoothing;
    }
    config.sanitize();

    let replay = args
        .replay
        .ok_or_else(|| anyhow::anyhow!("A replay file is required (--replay <file>)"))?;

    // Create and run application
    let mut app = GestureMouseApp::new(AppConfig {
        frame_input: FrameInput::Replay(replay),
        config,
    })?;
    app.run()?;

    Ok(())
}
