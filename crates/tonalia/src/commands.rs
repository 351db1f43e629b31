//! CLI command implementations

use anyhow::{bail, Context, Result};
use harmony::{
    analyze_chord_functions, degree_variations, generate_harmonic_field, generate_scale,
    key_table, Arity, Chord, Note, ScaleType,
};
use tonaliaconf::ConfigSources;
use tracing::debug;

use crate::output::{
    emit, ChordReport, FieldReport, FunctionsReport, KeysReport, ScaleReport, Style,
    VariationsReport,
};
use crate::settings::Settings;

fn style(settings: &Settings) -> Style {
    Style::new(settings.color())
}

/// Spelled scale with step names and degree functions
pub fn scale(settings: &Settings, tonic: Option<Note>, mode: Option<ScaleType>) -> Result<()> {
    let tonic = settings.tonic(tonic)?;
    let mode = settings.mode(mode)?;

    let report = ScaleReport {
        tonic,
        mode,
        name: mode.display_name(),
        notes: generate_scale(tonic, mode),
        steps: mode.interval_names(),
    };
    emit(&report, settings.format()?, &style(settings))
}

/// Harmonic field: degree label and chord name per degree
pub fn field(
    settings: &Settings,
    tonic: Option<Note>,
    mode: Option<ScaleType>,
    arity: Option<Arity>,
) -> Result<()> {
    let tonic = settings.tonic(tonic)?;
    let mode = settings.mode(mode)?;
    let arity = settings.arity(arity)?;

    let scale = generate_scale(tonic, mode);
    let report = FieldReport {
        tonic,
        mode,
        arity,
        chords: generate_harmonic_field(&scale, mode, arity),
    };
    emit(&report, settings.format()?, &style(settings))
}

/// Parse a chord name and describe its tones
pub fn chord(settings: &Settings, chord: &Chord, octave: i8) -> Result<()> {
    let report = ChordReport::new(chord, octave);
    emit(&report, settings.format()?, &style(settings))
}

/// Where a chord functions diatonically.
///
/// The chord comes either from its name or from `degree` (1-7) of a
/// key's harmonic field.
pub fn functions(
    settings: &Settings,
    chord: Option<Chord>,
    key: Option<Note>,
    mode: Option<ScaleType>,
    degree: Option<u8>,
    arity: Option<Arity>,
) -> Result<()> {
    let chord = match (chord, degree) {
        (Some(chord), _) => chord,
        (None, Some(degree)) => {
            let key = settings.tonic(key)?;
            let mode = settings.mode(mode)?;
            let arity = settings.arity(arity)?;
            let scale = generate_scale(key, mode);
            let field = generate_harmonic_field(&scale, mode, arity);
            field
                .get(usize::from(degree) - 1)
                .cloned()
                .with_context(|| format!("degree {} out of range (expected 1-7)", degree))?
        }
        (None, None) => bail!("Give a chord name, or --degree to pick one from a key"),
    };

    let matches = analyze_chord_functions(&chord);
    debug!(chord = %chord, matches = matches.len(), "functions");

    let report = FunctionsReport {
        chord: chord.name(),
        arity: chord.arity(),
        matches,
    };
    emit(&report, settings.format()?, &style(settings))
}

/// One degree of a tonic across all scale types
pub fn variations(settings: &Settings, tonic: Note, degree: u8) -> Result<()> {
    let tonic = settings.tonic(Some(tonic))?;
    let rows = degree_variations(tonic, usize::from(degree) - 1)
        .with_context(|| format!("degree {} of {}", degree, tonic))?;

    let report = VariationsReport {
        tonic,
        degree,
        variations: rows,
    };
    emit(&report, settings.format()?, &style(settings))
}

/// Harmonic fields for all twelve keys
pub fn keys(settings: &Settings, mode: Option<ScaleType>, arity: Option<Arity>) -> Result<()> {
    let mode = settings.mode(mode)?;
    let arity = settings.arity(arity)?;
    let prefer = settings.prefer()?;

    let report = KeysReport {
        mode,
        arity,
        prefer,
        rows: key_table(prefer, mode, arity),
    };
    emit(&report, settings.format()?, &style(settings))
}

/// Print the effective configuration as TOML, with its sources as comments
pub fn config(settings: &Settings, sources: &ConfigSources) -> Result<()> {
    for path in &sources.files {
        println!("# file: {}", path.display());
    }
    for var in &sources.env_overrides {
        println!("# env: {}", var);
    }
    print!("{}", settings.config().to_toml());
    Ok(())
}
