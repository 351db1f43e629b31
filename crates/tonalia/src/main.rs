//! tonalia - diatonic scales, harmonic fields, and chord functions
//!
//! Subcommands:
//! - `tonalia scale [tonic]` - Spell a scale
//! - `tonalia field [tonic]` - Harmonic field of triads or seventh chords
//! - `tonalia chord <name>` - Describe a chord given by name
//! - `tonalia functions <name>` - Every key and mode a chord belongs to
//! - `tonalia variations <tonic> <degree>` - One degree across all modes
//! - `tonalia keys` - Harmonic fields for all twelve keys
//! - `tonalia config` - Show the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use harmony::{Arity, Chord, EnharmonicPreference, Note, ScaleType};
use tonaliaconf::TonaliaConfig;
use tracing::debug;

mod commands;
mod output;
mod settings;

use settings::{GlobalFlags, OutputFormat, Settings};

#[derive(Parser)]
#[command(name = "tonalia")]
#[command(about = "Diatonic scales, harmonic fields, and chord functions")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./tonalia.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Spell black-key tonics and key tables with sharps or flats
    #[arg(long, global = true)]
    prefer: Option<EnharmonicPreference>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spell a scale with its steps and degree functions
    Scale {
        /// Tonic, e.g. C, F#, Bb (default from config)
        tonic: Option<Note>,

        /// Scale type, e.g. dorian, harmonicMinor
        #[arg(short, long)]
        mode: Option<ScaleType>,
    },

    /// Show the harmonic field of a scale
    Field {
        /// Tonic (default from config)
        tonic: Option<Note>,

        /// Scale type
        #[arg(short, long)]
        mode: Option<ScaleType>,

        /// triad or tetrad
        #[arg(short, long)]
        arity: Option<Arity>,
    },

    /// Describe a chord: quality, pitch classes, MIDI notes
    Chord {
        /// Chord name, e.g. F#m7(b5), Bb°, Cmaj7
        name: Chord,

        /// Octave of the root's letter (middle C is C4)
        #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
        octave: i8,
    },

    /// Find every key and mode in which a chord occurs
    Functions {
        /// Chord name; omit to take the chord from --degree instead
        #[arg(conflicts_with = "degree")]
        name: Option<Chord>,

        /// Key for --degree (default from config)
        #[arg(short, long, requires = "degree")]
        key: Option<Note>,

        /// Scale type for --degree
        #[arg(short, long, requires = "degree")]
        mode: Option<ScaleType>,

        /// Scale degree (1-7) of the key's harmonic field
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=7))]
        degree: Option<u8>,

        /// Arity of the chord taken with --degree
        #[arg(short, long, requires = "degree")]
        arity: Option<Arity>,
    },

    /// Show one degree's chords across all nine scale types
    Variations {
        /// Tonic
        tonic: Note,

        /// Scale degree (1-7)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        degree: u8,
    },

    /// Harmonic fields for all twelve keys
    Keys {
        /// Scale type
        #[arg(short, long)]
        mode: Option<ScaleType>,

        /// triad or tetrad
        #[arg(short, long)]
        arity: Option<Arity>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = TonaliaConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_new(&config.telemetry.log_level)
        .with_context(|| {
            format!(
                "invalid log level {:?} (from telemetry.log_level, TONALIA_LOG_LEVEL or RUST_LOG)",
                config.telemetry.log_level
            )
        })?;

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(
        files = ?sources.files,
        env = ?sources.env_overrides,
        "configuration loaded"
    );

    let settings = Settings::new(
        config,
        GlobalFlags {
            format: cli.format,
            prefer: cli.prefer,
            no_color: cli.no_color,
        },
    );

    match cli.command {
        Commands::Scale { tonic, mode } => {
            commands::scale(&settings, tonic, mode)?;
        }
        Commands::Field { tonic, mode, arity } => {
            commands::field(&settings, tonic, mode, arity)?;
        }
        Commands::Chord { name, octave } => {
            commands::chord(&settings, &name, octave)?;
        }
        Commands::Functions {
            name,
            key,
            mode,
            degree,
            arity,
        } => {
            commands::functions(&settings, name, key, mode, degree, arity)?;
        }
        Commands::Variations { tonic, degree } => {
            commands::variations(&settings, tonic, degree)?;
        }
        Commands::Keys { mode, arity } => {
            commands::keys(&settings, mode, arity)?;
        }
        Commands::Config => {
            commands::config(&settings, &sources)?;
        }
    }

    Ok(())
}
