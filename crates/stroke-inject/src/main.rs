//! stroke-inject command-line entry point.
//!
//! Loads the configuration, opens the Interception driver and runs one
//! request through the [`StrokeSequencer`].
//!
//! # Usage
//!
//! ```text
//! stroke-inject [OPTIONS] <COMMAND>
//!
//! Commands:
//!   type         Type a string character by character
//!   key          Press and release one or more keys
//!   hold         Press a key or mouse button without releasing it
//!   release      Release a key or mouse button
//!   click        Click a mouse button (BUTTON_1 .. BUTTON_5)
//!   move         Move the cursor
//!   scroll       Roll the mouse wheel
//!   resolve      Print the strokes for a token without touching the driver
//!   init-config  Write a default config file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Description                           |
//! |---------------------|---------------------------------------|
//! | `STROKE_CONFIG`     | Config file path                      |
//! | `STROKE_PRESS_MS`   | Default after-press delay (ms)        |
//! | `STROKE_RELEASE_MS` | Default after-release delay (ms)      |
//! | `RUST_LOG`          | `tracing` filter, overrides `log_level` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stroke_core::{resolve, KeyToken, MouseButton, MoveMode};
use stroke_inject::application::{StrokeSequencer, TypingReport, UnmappedPolicy};
use stroke_inject::infrastructure::sink::open_event_sink;
use stroke_inject::infrastructure::storage::config::{
    config_file_path, load_config, load_config_from, save_config_to, InjectorConfig,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Types text and drives the mouse through the Interception driver.
#[derive(Debug, Parser)]
#[command(name = "stroke-inject", version)]
struct Cli {
    /// Config file to use instead of the platform config directory.
    #[arg(long, global = true, env = "STROKE_CONFIG")]
    config: Option<PathBuf>,

    /// Default pause after each down-phase, in milliseconds.
    #[arg(long, global = true, env = "STROKE_PRESS_MS")]
    press_ms: Option<u64>,

    /// Default pause after each up-phase, in milliseconds.
    #[arg(long, global = true, env = "STROKE_RELEASE_MS")]
    release_ms: Option<u64>,

    /// Stop typing at the first character the layout cannot produce.
    #[arg(long, global = true)]
    abort_on_unmapped: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type a string character by character.
    Type {
        text: String,
        /// Pause after each character's release, in milliseconds.
        #[arg(long)]
        char_delay_ms: Option<u64>,
    },

    /// Press and release keys in order (`f5`, `enter`, `a`, `Á`, ...).
    Key {
        #[arg(required = true)]
        tokens: Vec<String>,
        #[command(flatten)]
        delays: CallDelays,
    },

    /// Press a key or mouse button without releasing it.
    Hold { token: String },

    /// Release a key or mouse button.
    Release { token: String },

    /// Click a mouse button (`BUTTON_1` .. `BUTTON_5`).
    Click {
        button: String,
        #[command(flatten)]
        delays: CallDelays,
    },

    /// Move the cursor to (`x`, `y`), or by that much with `--relative`.
    #[command(allow_negative_numbers = true)]
    Move {
        x: i32,
        y: i32,
        #[arg(long)]
        relative: bool,
    },

    /// Roll the wheel; positive is up (or right with `--horizontal`).
    #[command(allow_negative_numbers = true)]
    Scroll {
        amount: i16,
        #[arg(long)]
        horizontal: bool,
    },

    /// Print the strokes `token` resolves to without opening the driver.
    Resolve {
        token: String,
        /// Emit JSON instead of one line per key.
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with default values.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Per-call delay overrides.
#[derive(Debug, clap::Args)]
struct CallDelays {
    /// Pause after the down-phase for this call, in milliseconds.
    #[arg(long = "hold-ms")]
    after_press_ms: Option<u64>,
    /// Pause after the up-phase for this call, in milliseconds.
    #[arg(long = "gap-ms")]
    after_release_ms: Option<u64>,
}

impl CallDelays {
    fn after_press(&self) -> Option<Duration> {
        self.after_press_ms.map(Duration::from_millis)
    }

    fn after_release(&self) -> Option<Duration> {
        self.after_release_ms.map(Duration::from_millis)
    }
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    fn load_config(&self) -> anyhow::Result<InjectorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load config")?,
        };
        if let Some(ms) = self.press_ms {
            config.timing.delay_after_press_ms = ms;
        }
        if let Some(ms) = self.release_ms {
            config.timing.delay_after_release_ms = ms;
        }
        if self.abort_on_unmapped {
            config.typing.unmapped = UnmappedPolicy::Abort;
        }
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli, config).await
}

async fn run(cli: Cli, config: InjectorConfig) -> anyhow::Result<()> {
    // Commands that never touch the driver.
    match &cli.command {
        Command::Resolve { token, json } => return print_resolution(token, *json),
        Command::InitConfig { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => config_file_path().context("no config directory on this platform")?,
            };
            return write_default_config(&path, *force);
        }
        _ => {}
    }

    let sink = open_event_sink(&config.driver).context("failed to open the interception driver")?;
    let sequencer = StrokeSequencer::new(sink)
        .with_timing(config.timing.to_timing())
        .with_unmapped_policy(config.typing.unmapped);

    match cli.command {
        Command::Type {
            text,
            char_delay_ms,
        } => {
            let report = sequencer
                .print_text(&text, char_delay_ms.map(Duration::from_millis))
                .await?;
            log_report(&report);
        }
        Command::Key { tokens, delays } => {
            let report = sequencer
                .send_keys(&tokens, delays.after_press(), delays.after_release())
                .await?;
            log_report(&report);
        }
        Command::Hold { token } => toggle(&sequencer, &token, true)?,
        Command::Release { token } => toggle(&sequencer, &token, false)?,
        Command::Click { button, delays } => {
            sequencer
                .click(&button, delays.after_press(), delays.after_release())
                .await?;
        }
        Command::Move { x, y, relative } => {
            let mode = if relative {
                MoveMode::Relative
            } else {
                MoveMode::Absolute
            };
            sequencer.move_cursor(x, y, mode)?;
        }
        Command::Scroll { amount, horizontal } => {
            if horizontal {
                sequencer.scroll_wheel_horizontal(amount)?;
            } else {
                sequencer.scroll_wheel(amount)?;
            }
        }
        Command::Resolve { .. } | Command::InitConfig { .. } => {}
    }
    Ok(())
}

/// `BUTTON_N` names go to the mouse, everything else to the keyboard.
fn toggle(sequencer: &StrokeSequencer, token: &str, pressed: bool) -> anyhow::Result<()> {
    match token.parse::<MouseButton>() {
        Ok(button) => sequencer.set_button_state(button, pressed)?,
        Err(_) => sequencer.toggle_key(token, pressed)?,
    }
    Ok(())
}

fn log_report(report: &TypingReport) {
    if report.is_complete() {
        info!(dispatched = report.dispatched, "done");
    } else {
        let skipped: Vec<String> = report.skipped.iter().map(ToString::to_string).collect();
        warn!(
            dispatched = report.dispatched,
            skipped = ?skipped,
            "some input could not be typed with this layout"
        );
    }
}

fn print_resolution(token: &str, json: bool) -> anyhow::Result<()> {
    let token = KeyToken::parse(token);
    let bindings = resolve(&token).with_context(|| format!("cannot resolve {token:?}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }
    for binding in &bindings {
        let press = binding.press();
        let release = binding.release();
        println!(
            "0x{:02X}  down={} up={}{}",
            binding.code,
            press.state,
            release.state,
            if binding.is_extended() { "  (extended)" } else { "" }
        );
    }
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    save_config_to(&InjectorConfig::default(), path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
