//! Chords, their names, and harmonic field generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::mode::ScaleType;
use crate::parse;
use crate::pitch::SpelledNote;
use crate::scale::Scale;
use crate::Error;

/// Chord size: three-note triads or four-note seventh chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    #[default]
    Triad,
    Tetrad,
}

impl Arity {
    pub const ALL: [Arity; 2] = [Arity::Triad, Arity::Tetrad];

    pub fn as_str(self) -> &'static str {
        match self {
            Arity::Triad => "triad",
            Arity::Tetrad => "tetrad",
        }
    }

    /// Number of chord tones
    pub fn size(self) -> usize {
        match self {
            Arity::Triad => 3,
            Arity::Tetrad => 4,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "triad" | "triads" | "3" => Ok(Arity::Triad),
            "tetrad" | "tetrads" | "seventh" | "sevenths" | "7" | "4" => Ok(Arity::Tetrad),
            _ => Err(Error::InvalidArity(s.to_string())),
        }
    }
}

/// The eleven chord qualities that occur in the supported harmonic fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    #[serde(rename = "M")]
    Major,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "dim")]
    Diminished,
    #[serde(rename = "aug")]
    Augmented,
    #[serde(rename = "maj7")]
    Major7,
    #[serde(rename = "m7")]
    Minor7,
    #[serde(rename = "dom7")]
    Dominant7,
    #[serde(rename = "m7b5")]
    HalfDiminished7,
    #[serde(rename = "mMaj7")]
    MinorMajor7,
    #[serde(rename = "maj7#5")]
    AugmentedMajor7,
    #[serde(rename = "dim7")]
    Diminished7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Dominant7,
        ChordQuality::HalfDiminished7,
        ChordQuality::MinorMajor7,
        ChordQuality::AugmentedMajor7,
        ChordQuality::Diminished7,
    ];

    /// Short tag, as used in serialized output
    pub fn tag(self) -> &'static str {
        match self {
            ChordQuality::Major => "M",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "dom7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::MinorMajor7 => "mMaj7",
            ChordQuality::AugmentedMajor7 => "maj7#5",
            ChordQuality::Diminished7 => "dim7",
        }
    }

    /// Suffix appended to the root when naming a chord
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "°",
            ChordQuality::Augmented => "+",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::HalfDiminished7 => "m7(b5)",
            ChordQuality::MinorMajor7 => "m(maj7)",
            ChordQuality::AugmentedMajor7 => "maj7(#5)",
            ChordQuality::Diminished7 => "°7",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            ChordQuality::Major
            | ChordQuality::Minor
            | ChordQuality::Diminished
            | ChordQuality::Augmented => Arity::Triad,
            _ => Arity::Tetrad,
        }
    }

    /// Semitones above the root for each chord tone
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::MinorMajor7 => &[0, 3, 7, 11],
            ChordQuality::AugmentedMajor7 => &[0, 4, 8, 11],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChordQuality {
    type Err = Error;

    /// Accepts the tag (`maj7#5`) or any suffix the chord-name parser knows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(quality) = ChordQuality::ALL.into_iter().find(|q| q.tag() == trimmed) {
            return Ok(quality);
        }
        let mut input = trimmed;
        match parse::parse_quality_suffix(&mut input) {
            Ok(quality) if input.is_empty() && !trimmed.is_empty() => Ok(quality),
            _ => Err(Error::InvalidChordQuality(s.to_string())),
        }
    }
}

/// A chord built on one scale degree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    /// Roman-numeral degree label, e.g. "ii" or "V7". Empty when the chord
    /// was not taken from a harmonic field.
    pub degree: String,
    pub root: SpelledNote,
    pub quality: ChordQuality,
}

impl Chord {
    /// A chord outside any harmonic field (no degree label)
    pub fn new(root: impl Into<SpelledNote>, quality: ChordQuality) -> Self {
        Chord {
            degree: String::new(),
            root: root.into(),
            quality,
        }
    }

    /// Display name: root spelling followed by the quality suffix.
    ///
    /// This string is the chord's identity for function analysis, so
    /// `C#` and `Db` are different chords.
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }

    /// Parse a rendered chord name such as `F#m7(b5)`
    pub fn parse_name(name: &str) -> Result<Chord, Error> {
        let (root, quality) =
            parse::chord_name(name).ok_or_else(|| Error::InvalidChordName(name.to_string()))?;
        Ok(Chord::new(root, quality))
    }

    pub fn arity(&self) -> Arity {
        self.quality.arity()
    }

    /// Pitch classes of the chord tones, root first
    pub fn pitch_classes(&self) -> Vec<u8> {
        let root = self.root.pitch_class();
        self.quality
            .intervals()
            .iter()
            .map(|i| (root + i) % 12)
            .collect()
    }

    /// MIDI note numbers (middle C = 60) with the root's letter in `octave`.
    /// Values past either end of the MIDI range are clamped.
    pub fn midi_notes(&self, octave: i8) -> Vec<u8> {
        let root = (octave as i16 + 1) * 12 + self.root.semitones_from_c();
        self.quality
            .intervals()
            .iter()
            .map(|i| (root + *i as i16).clamp(0, 127) as u8)
            .collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

impl FromStr for Chord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::parse_name(s)
    }
}

/// Render a chord's display name.
pub fn chord_name(chord: &Chord) -> String {
    chord.name()
}

/// The seven diatonic chords of a scale, one per degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarmonicField([Chord; 7]);

impl HarmonicField {
    pub fn chords(&self) -> &[Chord; 7] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a field holds one chord per degree.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Chord at a 0-based degree index
    pub fn get(&self, index: usize) -> Option<&Chord> {
        self.0.get(index)
    }
}

impl Index<usize> for HarmonicField {
    type Output = Chord;

    fn index(&self, index: usize) -> &Chord {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a HarmonicField {
    type Item = &'a Chord;
    type IntoIter = std::slice::Iter<'a, Chord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build the harmonic field of `scale` for `mode` at the given arity.
///
/// The scale should come from [`crate::generate_scale`] with the same mode;
/// a mismatched pair still yields seven chords, just not meaningful ones.
pub fn generate_harmonic_field(scale: &Scale, mode: ScaleType, arity: Arity) -> HarmonicField {
    let template = mode.template(arity);
    let degrees = scale.degrees();
    HarmonicField(std::array::from_fn(|i| Chord {
        degree: template.degrees[i].to_string(),
        root: degrees[i],
        quality: template.qualities[i],
    }))
}
