use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use cubefall_common::SimConfig;
use cubefall_frame::{FrameLoop, FrameOutcome};
use cubefall_input::{Key, KeyEvent};
use cubefall_kernel::fall;
use cubefall_render::{DebugTextRenderer, Renderer};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubefall-cli", about = "Headless tools for the falling cubes simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default constants
    Info,
    /// Run the frame loop without a window and print the final state
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Seed for cube placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML file overriding simulation constants
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated keys fed one per frame: up, down, left, right, esc
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Output format for the final state
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Frames for a cube at rest to reach the floor from a given height
    Drop {
        /// Height of the cube's lower face above the floor
        #[arg(long, value_parser = parse_height, allow_negative_numbers = true)]
        height: f32,
        /// YAML file overriding simulation constants
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn parse_key(name: &str) -> anyhow::Result<Key> {
    Ok(match name.trim().to_ascii_lowercase().as_str() {
        "up" => Key::ArrowUp,
        "down" => Key::ArrowDown,
        "left" => Key::ArrowLeft,
        "right" => Key::ArrowRight,
        "esc" | "escape" => Key::Escape,
        other => bail!("unknown key {other:?}"),
    })
}

fn parse_height(s: &str) -> Result<f32, String> {
    let height: f32 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if !height.is_finite() {
        return Err(format!("height must be a finite number, got {s}"));
    }
    Ok(height)
}

const DROP_FRAME_LIMIT: u64 = 1_000_000;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let config = SimConfig::default();
            println!("cubefall-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "defaults: cubes={} size={} gravity={} floor={} step={}",
                config.cube_count, config.cube_size, config.gravity, config.floor_y, config.move_step
            );
        }
        Commands::Run {
            frames,
            seed,
            config,
            keys,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let keys = keys
                .iter()
                .map(|k| parse_key(k))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut frame_loop = FrameLoop::from_config(config, seed);
            let mut script = keys.into_iter();
            let mut rendered = 0u64;
            for _ in 0..frames {
                if let Some(key) = script.next() {
                    frame_loop.push_key(KeyEvent::pressed(key));
                }
                match frame_loop.frame() {
                    FrameOutcome::Render(_) => rendered += 1,
                    FrameOutcome::Exit => break,
                }
            }
            tracing::info!(rendered, exited = frame_loop.exit_requested(), "run finished");

            let sim = frame_loop.simulation();
            match format {
                Format::Text => print!("{}", DebugTextRenderer::new().render(sim)),
                Format::Yaml => print!("{}", serde_yaml::to_string(sim)?),
            }
        }
        Commands::Drop { height, config } => {
            let config = load_config(config.as_deref())?;
            if config.gravity >= 0.0 {
                println!("cube never reaches the floor (gravity={})", config.gravity);
                return Ok(());
            }
            let Some(closed) = fall::frames_to_floor(height, config.gravity) else {
                bail!("frame count for height {height} does not fit in 64 bits");
            };
            println!("closed-form: {closed} frames");
            match fall::simulate_frames_to_floor(&config, height, DROP_FRAME_LIMIT) {
                Some(simulated) => {
                    println!("simulated:   {simulated} frames");
                    println!("Match: {}", if closed == simulated { "OK" } else { "MISMATCH" });
                }
                None => println!("simulated:   not landed after {DROP_FRAME_LIMIT} frames"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(parse_key("up").unwrap(), Key::ArrowUp);
        assert_eq!(parse_key(" Left ").unwrap(), Key::ArrowLeft);
        assert_eq!(parse_key("ESC").unwrap(), Key::Escape);
        assert!(parse_key("jump").is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), SimConfig::default());
    }

    #[test]
    fn cli_parses_run_with_keys() {
        let cli = Cli::try_parse_from(["cubefall-cli", "run", "--frames", "5", "--keys", "up,esc"])
            .unwrap();
        match cli.command {
            Commands::Run { frames, keys, .. } => {
                assert_eq!(frames, 5);
                assert_eq!(keys, vec!["up".to_string(), "esc".to_string()]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn drop_rejects_non_finite_height() {
        for bad in ["inf", "-inf", "NaN", "tall"] {
            assert!(
                Cli::try_parse_from(["cubefall-cli", "drop", "--height", bad]).is_err(),
                "accepted {bad}"
            );
        }
        let cli = Cli::try_parse_from(["cubefall-cli", "drop", "--height", "0.003"]).unwrap();
        match cli.command {
            Commands::Drop { height, .. } => assert_eq!(height, 0.003),
            _ => panic!("expected drop"),
        }
    }
}
