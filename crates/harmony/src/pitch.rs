//! Pitch model: letter names, the 17 canonical note spellings, and the
//! letter-plus-accidentals spellings that scale generation produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parse;
use crate::Error;

/// The seven natural letter names, in cycle order starting from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in order
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Pitch class (0-11) of the unaltered letter
    pub fn natural_pitch_class(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the C..B cycle (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next letter in the cycle, wrapping from B back to C.
    pub fn next(self) -> Letter {
        Self::ALL[(self.index() + 1) % 7]
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Parse from an uppercase or lowercase letter
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the 17 canonical note spellings a tonic can be chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Db")]
    DFlat,
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "Eb")]
    EFlat,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "Gb")]
    GFlat,
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "Ab")]
    AFlat,
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "Bb")]
    BFlat,
    B,
}

/// Keys used by the function search, one per pitch class.
const SHARP_KEYS: [Note; 12] = [
    Note::C,
    Note::CSharp,
    Note::D,
    Note::DSharp,
    Note::E,
    Note::F,
    Note::FSharp,
    Note::G,
    Note::GSharp,
    Note::A,
    Note::ASharp,
    Note::B,
];

const FLAT_KEYS: [Note; 12] = [
    Note::C,
    Note::DFlat,
    Note::D,
    Note::EFlat,
    Note::E,
    Note::F,
    Note::GFlat,
    Note::G,
    Note::AFlat,
    Note::A,
    Note::BFlat,
    Note::B,
];

impl Note {
    /// All 17 spellings, in pitch order with sharps before flats
    pub const ALL: [Note; 17] = [
        Note::C,
        Note::CSharp,
        Note::DFlat,
        Note::D,
        Note::DSharp,
        Note::EFlat,
        Note::E,
        Note::F,
        Note::FSharp,
        Note::GFlat,
        Note::G,
        Note::GSharp,
        Note::AFlat,
        Note::A,
        Note::ASharp,
        Note::BFlat,
        Note::B,
    ];

    /// The twelve keys spelled with sharps (C, C#, D, ... B)
    pub fn sharp_keys() -> [Note; 12] {
        SHARP_KEYS
    }

    /// The twelve keys spelled with flats (C, Db, D, ... B)
    pub fn flat_keys() -> [Note; 12] {
        FLAT_KEYS
    }

    /// The twelve keys for a spelling preference
    pub fn keys(preference: EnharmonicPreference) -> [Note; 12] {
        match preference {
            EnharmonicPreference::Sharp => SHARP_KEYS,
            EnharmonicPreference::Flat => FLAT_KEYS,
        }
    }

    pub fn letter(self) -> Letter {
        match self {
            Note::C | Note::CSharp => Letter::C,
            Note::DFlat | Note::D | Note::DSharp => Letter::D,
            Note::EFlat | Note::E => Letter::E,
            Note::F | Note::FSharp => Letter::F,
            Note::GFlat | Note::G | Note::GSharp => Letter::G,
            Note::AFlat | Note::A | Note::ASharp => Letter::A,
            Note::BFlat | Note::B => Letter::B,
        }
    }

    /// Signed accidental count: +1 sharp, -1 flat, 0 natural
    pub fn accidentals(self) -> i8 {
        match self {
            Note::CSharp | Note::DSharp | Note::FSharp | Note::GSharp | Note::ASharp => 1,
            Note::DFlat | Note::EFlat | Note::GFlat | Note::AFlat | Note::BFlat => -1,
            _ => 0,
        }
    }

    /// Pitch class (0-11)
    pub fn pitch_class(self) -> u8 {
        self.spelled().pitch_class()
    }

    pub fn spelled(self) -> SpelledNote {
        SpelledNote::new(self.letter(), self.accidentals())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::CSharp => "C#",
            Note::DFlat => "Db",
            Note::D => "D",
            Note::DSharp => "D#",
            Note::EFlat => "Eb",
            Note::E => "E",
            Note::F => "F",
            Note::FSharp => "F#",
            Note::GFlat => "Gb",
            Note::G => "G",
            Note::GSharp => "G#",
            Note::AFlat => "Ab",
            Note::A => "A",
            Note::ASharp => "A#",
            Note::BFlat => "Bb",
            Note::B => "B",
        }
    }

    /// Same pitch class spelled from the sharp key list
    pub fn to_sharp(self) -> Note {
        SHARP_KEYS[self.pitch_class() as usize]
    }

    /// Same pitch class spelled from the flat key list
    pub fn to_flat(self) -> Note {
        FLAT_KEYS[self.pitch_class() as usize]
    }

    /// Respell a black-key note to match the preference. Naturals are unchanged.
    pub fn with_preference(self, preference: EnharmonicPreference) -> Note {
        match preference {
            EnharmonicPreference::Sharp => self.to_sharp(),
            EnharmonicPreference::Flat => self.to_flat(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spelled: SpelledNote = s.parse()?;
        Note::try_from(spelled)
    }
}

impl TryFrom<SpelledNote> for Note {
    type Error = Error;

    fn try_from(spelled: SpelledNote) -> Result<Self, Self::Error> {
        Note::ALL
            .into_iter()
            .find(|note| note.spelled() == spelled)
            .ok_or_else(|| Error::InvalidNote(spelled.to_string()))
    }
}

impl From<Note> for SpelledNote {
    fn from(note: Note) -> Self {
        note.spelled()
    }
}

/// A letter with any number of sharps (positive) or flats (negative).
///
/// Scale generation can produce spellings outside the canonical 17
/// (E#, Cb, F##, Bbb), so scale entries and chord roots use this type.
/// Serializes as its rendered name, e.g. `"F##"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpelledNote {
    pub letter: Letter,
    pub accidentals: i8,
}

impl SpelledNote {
    pub fn new(letter: Letter, accidentals: i8) -> Self {
        SpelledNote {
            letter,
            accidentals,
        }
    }

    /// Spell `pitch_class` using `letter`, choosing the accidental count
    /// with the smallest magnitude (normalized into -6..=6).
    pub fn spell(letter: Letter, pitch_class: u8) -> Self {
        let mut diff = pitch_class as i8 - letter.natural_pitch_class() as i8;
        if diff > 6 {
            diff -= 12;
        }
        if diff < -6 {
            diff += 12;
        }
        SpelledNote::new(letter, diff)
    }

    /// Pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        (self.letter.natural_pitch_class() as i16 + self.accidentals as i16).rem_euclid(12) as u8
    }

    /// Semitone offset from C of the same octave; may fall outside 0-11
    /// for spellings like Cb or B#.
    pub fn semitones_from_c(&self) -> i16 {
        self.letter.natural_pitch_class() as i16 + self.accidentals as i16
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        let symbol = if self.accidentals > 0 { '#' } else { 'b' };
        for _ in 0..self.accidentals.unsigned_abs() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for SpelledNote {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::spelling(s).ok_or_else(|| Error::InvalidNote(s.to_string()))
    }
}

impl TryFrom<String> for SpelledNote {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SpelledNote> for String {
    fn from(note: SpelledNote) -> Self {
        note.to_string()
    }
}

/// Whether black-key tonics are spelled with sharps or flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnharmonicPreference {
    #[default]
    Sharp,
    Flat,
}

impl EnharmonicPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            EnharmonicPreference::Sharp => "sharp",
            EnharmonicPreference::Flat => "flat",
        }
    }
}

impl fmt::Display for EnharmonicPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnharmonicPreference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sharp" | "sharps" | "#" => Ok(EnharmonicPreference::Sharp),
            "flat" | "flats" | "b" => Ok(EnharmonicPreference::Flat),
            _ => Err(Error::InvalidPreference(s.to_string())),
        }
    }
}
