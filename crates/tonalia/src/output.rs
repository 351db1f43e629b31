//! Report types and their text and JSON renderings.

use anyhow::Result;
use harmony::{
    Arity, Chord, ChordQuality, DegreeVariation, EnharmonicPreference, FunctionMatch,
    HarmonicField, KeyRow, Note, Scale, ScaleDegree, ScaleType, SpelledNote,
};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::settings::OutputFormat;

/// Terminal styling; every method is a no-op with `no_color`.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    no_color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Self { no_color: !color }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        text.bright_cyan().bold().to_string()
    }

    pub fn note(&self, text: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        text.bright_green().bold().to_string()
    }

    pub fn label(&self, text: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        text.yellow().to_string()
    }

    pub fn dim(&self, text: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        text.dimmed().to_string()
    }
}

/// Something a subcommand prints.
pub trait Render: Serialize {
    fn render(&self, style: &Style) -> String;
}

/// Print a report to stdout in the requested format.
pub fn emit<R: Render>(report: &R, format: OutputFormat, style: &Style) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render(style)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn arity_heading(arity: Arity) -> &'static str {
    match arity {
        Arity::Triad => "triads",
        Arity::Tetrad => "seventh chords",
    }
}

#[derive(Debug, Serialize)]
pub struct ScaleReport {
    pub tonic: Note,
    pub mode: ScaleType,
    pub name: &'static str,
    pub notes: Scale,
    pub steps: [&'static str; 7],
}

impl Render for ScaleReport {
    fn render(&self, style: &Style) -> String {
        let mut out = format!(
            "{}\n",
            style.heading(&format!("{} {}", self.tonic, self.name))
        );
        for (i, note) in self.notes.iter().enumerate() {
            let degree = ScaleDegree::from_position(i);
            out.push_str(&format!(
                "  {}  {}  {}\n",
                style.dim(&(i + 1).to_string()),
                style.note(&format!("{:<4}", note.to_string())),
                degree
            ));
        }
        out.push_str(&format!(
            "{} {}\n",
            style.label("steps:"),
            self.steps.join(" ")
        ));
        out
    }
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub tonic: Note,
    pub mode: ScaleType,
    pub arity: Arity,
    pub chords: HarmonicField,
}

impl Render for FieldReport {
    fn render(&self, style: &Style) -> String {
        let mut out = format!(
            "{}\n",
            style.heading(&format!(
                "{} {} {}",
                self.tonic,
                self.mode.display_name(),
                arity_heading(self.arity)
            ))
        );
        for chord in &self.chords {
            out.push_str(&format!(
                "  {}  {}\n",
                style.label(&format!("{:<12}", chord.degree)),
                style.note(&chord.name())
            ));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct ChordReport {
    pub name: String,
    pub root: SpelledNote,
    pub quality: ChordQuality,
    pub arity: Arity,
    pub pitch_classes: Vec<u8>,
    pub octave: i8,
    pub midi_notes: Vec<u8>,
}

impl ChordReport {
    pub fn new(chord: &Chord, octave: i8) -> Self {
        Self {
            name: chord.name(),
            root: chord.root,
            quality: chord.quality,
            arity: chord.arity(),
            pitch_classes: chord.pitch_classes(),
            octave,
            midi_notes: chord.midi_notes(octave),
        }
    }
}

fn join_numbers(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Render for ChordReport {
    fn render(&self, style: &Style) -> String {
        let mut out = format!("{}\n", style.heading(&self.name));
        out.push_str(&format!(
            "  {}  {}\n",
            style.label(&format!("{:<14}", "root")),
            self.root
        ));
        out.push_str(&format!(
            "  {}  {} ({})\n",
            style.label(&format!("{:<14}", "quality")),
            self.quality,
            self.arity
        ));
        out.push_str(&format!(
            "  {}  {}\n",
            style.label(&format!("{:<14}", "pitch classes")),
            join_numbers(&self.pitch_classes)
        ));
        out.push_str(&format!(
            "  {}  {}\n",
            style.label(&format!("{:<14}", format!("midi (oct {})", self.octave))),
            join_numbers(&self.midi_notes)
        ));
        out
    }
}

#[derive(Debug, Serialize)]
pub struct FunctionsReport {
    pub chord: String,
    pub arity: Arity,
    pub matches: Vec<FunctionMatch>,
}

impl Render for FunctionsReport {
    fn render(&self, style: &Style) -> String {
        if self.matches.is_empty() {
            return format!(
                "{} {}\n",
                style.note(&self.chord),
                style.dim("does not occur in any supported key")
            );
        }

        let count = self.matches.len();
        let mut out = format!(
            "{}\n",
            style.heading(&format!(
                "{} functions in {} position{}",
                self.chord,
                count,
                if count == 1 { "" } else { "s" }
            ))
        );
        for m in &self.matches {
            out.push_str(&format!(
                "  {}  {:<16}  {}\n",
                style.note(&format!("{:<3}", m.key.as_str())),
                m.scale,
                style.label(&m.degree)
            ));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct VariationsReport {
    pub tonic: Note,
    /// 1-based
    pub degree: u8,
    pub variations: Vec<DegreeVariation>,
}

impl Render for VariationsReport {
    fn render(&self, style: &Style) -> String {
        let function = ScaleDegree::from_position(usize::from(self.degree.saturating_sub(1)));
        let mut out = format!(
            "{}\n",
            style.heading(&format!(
                "Degree {} ({}) of {} across modes",
                self.degree, function, self.tonic
            ))
        );
        for row in &self.variations {
            out.push_str(&format!(
                "  {:<16}  {}  {}\n",
                row.scale_type.display_name(),
                style.note(&format!("{:<14}", labeled(&row.triad))),
                style.note(&labeled(&row.tetrad))
            ));
        }
        out
    }
}

/// Chord name followed by its degree label, e.g. `Eb (bV)`
fn labeled(chord: &Chord) -> String {
    format!("{} ({})", chord.name(), chord.degree)
}

#[derive(Debug, Serialize)]
pub struct KeysReport {
    pub mode: ScaleType,
    pub arity: Arity,
    pub prefer: EnharmonicPreference,
    pub rows: Vec<KeyRow>,
}

impl Render for KeysReport {
    fn render(&self, style: &Style) -> String {
        let width = match self.arity {
            Arity::Triad => 6,
            Arity::Tetrad => 11,
        };
        let mut out = format!(
            "{}\n",
            style.heading(&format!(
                "{} {} in all keys",
                self.mode.display_name(),
                arity_heading(self.arity)
            ))
        );
        for row in &self.rows {
            let chords: Vec<String> = row
                .field
                .iter()
                .map(|c| format!("{:<width$}", c.name(), width = width))
                .collect();
            out.push_str(&format!(
                "  {}  {}\n",
                style.note(&format!("{:<3}", row.key.as_str())),
                chords.join(" ").trim_end()
            ));
        }
        out
    }
}
