//! audioswitch - switch macOS audio output devices by (fuzzy) name.
//!
//! # Usage
//!
//! ```bash
//! # List available output devices
//! audioswitch
//!
//! # Switch by name - typos, partial words and abbreviations are fine
//! audioswitch "macbok spekers"
//!
//! # Interactive picker
//! audioswitch -i
//!
//! # Volume and mute
//! audioswitch -g
//! audioswitch -v 40
//! audioswitch -u 10
//! audioswitch -m
//! ```

mod commands;
mod interactive;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use audioswitch_macos::SystemAudio;

/// Select a macOS audio output device by name and control volume settings
#[derive(Parser)]
#[command(name = "audioswitch")]
#[command(author, version)]
#[command(about = "Select a macOS audio output device by name and control volume settings")]
struct Args {
    /// Interactive mode: selection using arrow keys
    #[arg(short, long)]
    interactive: bool,

    /// Show the current audio output device
    #[arg(short, long)]
    current: bool,

    /// Toggle mute/unmute
    #[arg(short = 'm', long)]
    toggle_mute: bool,

    /// Show the current volume level
    #[arg(short, long)]
    get_volume: bool,

    /// Set the volume to a specific level (0-100)
    #[arg(short, long, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Increase the volume by a specific amount
    #[arg(short = 'u', long, value_name = "AMOUNT", value_parser = clap::value_parser!(u8).range(0..=100))]
    volume_up: Option<u8>,

    /// Decrease the volume by a specific amount
    #[arg(short = 'd', long, value_name = "AMOUNT", value_parser = clap::value_parser!(u8).range(0..=100))]
    volume_down: Option<u8>,

    /// Print the device listing as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (--verbose, --verbose --verbose, ...)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Name of the audio output device. If omitted, lists available devices
    device: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let audio = SystemAudio::new();

    if args.get_volume {
        return commands::show_volume(&audio);
    }
    if let Some(level) = args.volume {
        return commands::set_volume(&audio, level);
    }
    if let Some(amount) = args.volume_up {
        return commands::adjust_volume(&audio, i16::from(amount));
    }
    if let Some(amount) = args.volume_down {
        return commands::adjust_volume(&audio, -i16::from(amount));
    }
    if args.toggle_mute {
        return commands::toggle_mute(&audio);
    }
    if args.current {
        return commands::show_current(&audio);
    }
    if args.interactive {
        return interactive::run(&audio, &audio);
    }

    match args.device {
        Some(query) => commands::switch(&audio, &query),
        None => commands::list(&audio, args.json),
    }
}
