//! Diatonic harmony engine.
//!
//! Given a tonic and one of nine scale types, this crate spells the scale
//! with correct letters and accidentals, builds its harmonic field of
//! triads or seventh chords, names chords, and answers two questions:
//! in which keys and modes a chord functions diatonically, and how a
//! degree's chord changes across the modes of one tonic.
//!
//! Everything is a pure function of its arguments; nothing is cached.
//!
//! # Example
//!
//! ```
//! use harmony::{generate_harmonic_field, generate_scale, Arity, Note, ScaleType};
//!
//! let scale = generate_scale(Note::C, ScaleType::Aeolian);
//! assert_eq!(scale.to_string(), "C D Eb F G Ab Bb C");
//!
//! let field = generate_harmonic_field(&scale, ScaleType::Aeolian, Arity::Tetrad);
//! assert_eq!(field[4].name(), "Gm7");
//! assert_eq!(field[4].degree, "vm7");
//! ```

pub mod analysis;
pub mod chord;
pub mod mode;
pub mod parse;
pub mod pitch;
pub mod scale;

pub use analysis::{
    analyze_chord_functions, degree_variations, key_table, DegreeVariation, FunctionMatch,
    KeyRow,
};
pub use chord::{chord_name, generate_harmonic_field, Arity, Chord, ChordQuality, HarmonicField};
pub use mode::{HarmonicTemplate, ScaleType};
pub use pitch::{EnharmonicPreference, Letter, Note, SpelledNote};
pub use scale::{generate_scale, Scale, ScaleDegree};

/// Errors from rejected inputs. Every operation is total over valid
/// inputs, so these only arise when parsing or range-checking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid note spelling: {0:?}")]
    InvalidNote(String),

    #[error("invalid scale type: {0:?}")]
    InvalidScaleType(String),

    #[error("degree index {0} out of range (expected 0-6)")]
    InvalidDegreeIndex(usize),

    #[error("invalid chord quality: {0:?}")]
    InvalidChordQuality(String),

    #[error("invalid chord name: {0:?}")]
    InvalidChordName(String),

    #[error("invalid chord arity: {0:?} (expected triad or tetrad)")]
    InvalidArity(String),

    #[error("invalid enharmonic preference: {0:?} (expected sharp or flat)")]
    InvalidPreference(String),
}

pub type Result<T> = std::result::Result<T, Error>;
