//! Cross-key and cross-mode queries built on repeated scale and field
//! generation: where a chord functions diatonically, how one degree's
//! chord changes across modes, and the all-keys overview.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chord::{generate_harmonic_field, Arity, Chord, HarmonicField};
use crate::mode::ScaleType;
use crate::pitch::{EnharmonicPreference, Note};
use crate::scale::generate_scale;
use crate::{Error, Result};

/// One key/mode/degree position where a chord occurs diatonically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMatch {
    /// Tonic, always from the sharp key list
    pub key: Note,
    pub scale_type: ScaleType,
    /// Display name of the scale type
    pub scale: String,
    /// Degree label within that field, e.g. "V7"
    pub degree: String,
}

/// The chords on one degree under a single scale type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeVariation {
    pub scale_type: ScaleType,
    pub triad: Chord,
    pub tetrad: Chord,
}

/// One row of the all-keys overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRow {
    pub key: Note,
    pub field: HarmonicField,
}

/// Find every diatonic position in which `chord` occurs.
///
/// Searches all 12 sharp-spelled tonics and all 9 scale types at the
/// chord's own arity. Chords are compared by rendered name, so an
/// enharmonic respelling (Db vs C#) does not match. Results come out in
/// tonic order, then scale type order, then degree order.
pub fn analyze_chord_functions(chord: &Chord) -> Vec<FunctionMatch> {
    let target = chord.name();
    let arity = chord.arity();
    let mut results = Vec::new();

    for key in Note::sharp_keys() {
        for scale_type in ScaleType::ALL {
            let scale = generate_scale(key, scale_type);
            let field = generate_harmonic_field(&scale, scale_type, arity);

            for candidate in &field {
                if candidate.name() == target {
                    results.push(FunctionMatch {
                        key,
                        scale_type,
                        scale: scale_type.display_name().to_string(),
                        degree: candidate.degree.clone(),
                    });
                }
            }
        }
    }

    debug!(
        chord = %target,
        arity = %arity,
        matches = results.len(),
        "chord function search complete"
    );

    results
}

/// The chord on `degree_index` (0-6) of `tonic` under each scale type,
/// at both arities.
pub fn degree_variations(tonic: Note, degree_index: usize) -> Result<Vec<DegreeVariation>> {
    if degree_index > 6 {
        return Err(Error::InvalidDegreeIndex(degree_index));
    }

    let variations = ScaleType::ALL
        .into_iter()
        .map(|scale_type| {
            let scale = generate_scale(tonic, scale_type);
            let triads = generate_harmonic_field(&scale, scale_type, Arity::Triad);
            let tetrads = generate_harmonic_field(&scale, scale_type, Arity::Tetrad);
            DegreeVariation {
                scale_type,
                triad: triads[degree_index].clone(),
                tetrad: tetrads[degree_index].clone(),
            }
        })
        .collect();

    debug!(tonic = %tonic, degree_index, "degree variations computed");
    Ok(variations)
}

/// Harmonic fields of `scale_type` for all twelve keys, spelled per `preference`.
pub fn key_table(
    preference: EnharmonicPreference,
    scale_type: ScaleType,
    arity: Arity,
) -> Vec<KeyRow> {
    Note::keys(preference)
        .into_iter()
        .map(|key| {
            let scale = generate_scale(key, scale_type);
            KeyRow {
                key,
                field: generate_harmonic_field(&scale, scale_type, arity),
            }
        })
        .collect()
}
