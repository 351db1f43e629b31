//! Diatonic scale spelling.
//!
//! Each scale uses every letter exactly once, so accidentals fall out of
//! the gap between the running pitch class and the next letter's natural
//! pitch class rather than from a lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::mode::ScaleType;
use crate::pitch::{Note, SpelledNote};

/// Seven spelled degrees followed by the tonic again at the octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale([SpelledNote; 8]);

impl Scale {
    /// All eight entries, octave included
    pub fn notes(&self) -> &[SpelledNote; 8] {
        &self.0
    }

    /// The seven scale degrees, without the octave repeat
    pub fn degrees(&self) -> &[SpelledNote] {
        &self.0[..7]
    }

    pub fn tonic(&self) -> SpelledNote {
        self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpelledNote> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the octave is always present.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Index<usize> for Scale {
    type Output = SpelledNote;

    fn index(&self, index: usize) -> &SpelledNote {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Scale {
    type Item = &'a SpelledNote;
    type IntoIter = std::slice::Iter<'a, SpelledNote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, note) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", note)?;
        }
        Ok(())
    }
}

/// Spell the scale of `mode` starting on `tonic`.
pub fn generate_scale(tonic: Note, mode: ScaleType) -> Scale {
    let intervals = mode.intervals();
    let mut notes = [tonic.spelled(); 8];

    let mut pitch = tonic.pitch_class();
    let mut letter = tonic.letter();

    // The last step only returns to the tonic, which is already in place.
    for (i, step) in intervals[..6].iter().enumerate() {
        pitch = (pitch + step) % 12;
        letter = letter.next();
        notes[i + 1] = SpelledNote::spell(letter, pitch);
    }

    Scale(notes)
}

/// Functional name of a scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDegree {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    /// Leading tone in major-like modes, subtonic when the seventh is flat
    LeadingTone,
}

impl ScaleDegree {
    pub const ALL: [ScaleDegree; 7] = [
        ScaleDegree::Tonic,
        ScaleDegree::Supertonic,
        ScaleDegree::Mediant,
        ScaleDegree::Subdominant,
        ScaleDegree::Dominant,
        ScaleDegree::Submediant,
        ScaleDegree::LeadingTone,
    ];

    /// Degree for a position in an 8-note scale; the octave wraps to the tonic.
    pub fn from_position(position: usize) -> ScaleDegree {
        Self::ALL[position % 7]
    }

    /// 1-based degree number
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleDegree::Tonic => "Tonic",
            ScaleDegree::Supertonic => "Supertonic",
            ScaleDegree::Mediant => "Mediant",
            ScaleDegree::Subdominant => "Subdominant",
            ScaleDegree::Dominant => "Dominant",
            ScaleDegree::Submediant => "Submediant",
            ScaleDegree::LeadingTone => "Leading tone / Subtonic",
        }
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
