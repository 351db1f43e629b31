//! The nine supported scale types and their static tables: step
//! intervals and per-arity harmonic field templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chord::{Arity, ChordQuality};
use crate::Error;

use crate::chord::ChordQuality::{
    Augmented as Aug, AugmentedMajor7 as Maj7Sharp5, Diminished as Dim, Diminished7 as Dim7,
    Dominant7 as Dom7, HalfDiminished7 as M7b5, Major as Maj, Major7 as Maj7, Minor as Min,
    Minor7 as Min7, MinorMajor7 as MinMaj7,
};

/// Diatonic scale types, in the fixed order every analysis iterates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleType {
    #[default]
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
}

/// Chord qualities and roman-numeral labels for the seven degrees of one
/// scale type at one arity.
#[derive(Debug)]
pub struct HarmonicTemplate {
    pub qualities: [ChordQuality; 7],
    pub degrees: [&'static str; 7],
}

static IONIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Maj, Min, Min, Maj, Maj, Min, Dim],
    degrees: ["I", "ii", "iii", "IV", "V", "vi", "vii°"],
};
static IONIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Maj7, Min7, Min7, Maj7, Dom7, Min7, M7b5],
    degrees: ["Imaj7", "iim7", "iiim7", "IVmaj7", "V7", "vim7", "viiø7"],
};

static DORIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min, Min, Maj, Maj, Min, Dim, Maj],
    degrees: ["i", "ii", "III", "IV", "v", "vi°", "VII"],
};
static DORIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min7, Min7, Maj7, Dom7, Min7, M7b5, Maj7],
    degrees: ["im7", "iim7", "IIImaj7", "IV7", "vm7", "viø7", "VIImaj7"],
};

static PHRYGIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min, Maj, Maj, Min, Dim, Maj, Min],
    degrees: ["i", "bII", "bIII", "iv", "v°", "bVI", "bvii"],
};
static PHRYGIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min7, Maj7, Dom7, Min7, M7b5, Maj7, Min7],
    degrees: ["im7", "bIImaj7", "bIII7", "ivm7", "vø7", "bVImaj7", "bviim7"],
};

static LYDIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Maj, Maj, Min, Dim, Maj, Min, Min],
    degrees: ["I", "II", "iii", "#iv°", "V", "vi", "vii"],
};
static LYDIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Maj7, Dom7, Min7, M7b5, Maj7, Min7, Min7],
    degrees: ["Imaj7", "II7", "iiim7", "#ivø7", "Vmaj7", "vim7", "viim7"],
};

static MIXOLYDIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Maj, Min, Dim, Maj, Min, Min, Maj],
    degrees: ["I", "ii", "iii°", "IV", "v", "vi", "bVII"],
};
static MIXOLYDIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Dom7, Min7, M7b5, Maj7, Min7, Min7, Maj7],
    degrees: ["I7", "iim7", "iiiø7", "IVmaj7", "vm7", "vim7", "bVIImaj7"],
};

static AEOLIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min, Dim, Maj, Min, Min, Maj, Maj],
    degrees: ["i", "ii°", "III", "iv", "v", "VI", "VII"],
};
static AEOLIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min7, M7b5, Maj7, Min7, Min7, Maj7, Dom7],
    degrees: ["im7", "iiø7", "IIImaj7", "ivm7", "vm7", "VImaj7", "VII7"],
};

static LOCRIAN_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Dim, Maj, Min, Min, Maj, Maj, Min],
    degrees: ["i°", "bII", "biii", "iv", "bV", "bVI", "bvii"],
};
static LOCRIAN_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [M7b5, Maj7, Min7, Min7, Maj7, Dom7, Min7],
    degrees: ["iø7", "bIImaj7", "bIIIm7", "ivm7", "bVmaj7", "bVI7", "bVIIm7"],
};

static HARMONIC_MINOR_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min, Dim, Aug, Min, Maj, Maj, Dim],
    degrees: ["i", "ii°", "III+", "iv", "V", "VI", "vii°"],
};
static HARMONIC_MINOR_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [MinMaj7, M7b5, Maj7Sharp5, Min7, Dom7, Maj7, Dim7],
    degrees: ["imM7", "iiø7", "IIImaj7(#5)", "ivm7", "V7", "VImaj7", "vii°7"],
};

static MELODIC_MINOR_TRIADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [Min, Min, Aug, Maj, Maj, Dim, Dim],
    degrees: ["i", "ii", "III+", "IV", "V", "vi°", "vii°"],
};
static MELODIC_MINOR_TETRADS: HarmonicTemplate = HarmonicTemplate {
    qualities: [MinMaj7, Min7, Maj7Sharp5, Dom7, Dom7, M7b5, M7b5],
    degrees: ["imM7", "iim7", "IIImaj7(#5)", "IV7", "V7", "viø7", "viiø7"],
};

impl ScaleType {
    /// Declaration order; analysis results follow it.
    pub const ALL: [ScaleType; 9] = [
        ScaleType::Ionian,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Aeolian,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
    ];

    /// Serialized tag, e.g. `harmonicMinor`
    pub fn tag(self) -> &'static str {
        match self {
            ScaleType::Ionian => "ionian",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Aeolian => "aeolian",
            ScaleType::Locrian => "locrian",
            ScaleType::HarmonicMinor => "harmonicMinor",
            ScaleType::MelodicMinor => "melodicMinor",
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            ScaleType::Ionian => "Ionian (Major)",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::Aeolian => "Aeolian (Minor)",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
        }
    }

    /// Semitone steps between consecutive degrees, ending back on the tonic.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            ScaleType::Ionian => [2, 2, 1, 2, 2, 2, 1],
            ScaleType::Dorian => [2, 1, 2, 2, 2, 1, 2],
            ScaleType::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            ScaleType::Lydian => [2, 2, 2, 1, 2, 2, 1],
            ScaleType::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
            ScaleType::Aeolian => [2, 1, 2, 2, 1, 2, 2],
            ScaleType::Locrian => [1, 2, 2, 1, 2, 2, 2],
            ScaleType::HarmonicMinor => [2, 1, 2, 2, 1, 3, 1],
            // Ascending form
            ScaleType::MelodicMinor => [2, 1, 2, 2, 2, 2, 1],
        }
    }

    /// Step names: `W` whole, `H` half, `W+H` augmented second.
    pub fn interval_names(self) -> [&'static str; 7] {
        self.intervals().map(|step| match step {
            1 => "H",
            2 => "W",
            _ => "W+H",
        })
    }

    /// Harmonic field template for this scale type at `arity`
    pub fn template(self, arity: Arity) -> &'static HarmonicTemplate {
        match (self, arity) {
            (ScaleType::Ionian, Arity::Triad) => &IONIAN_TRIADS,
            (ScaleType::Ionian, Arity::Tetrad) => &IONIAN_TETRADS,
            (ScaleType::Dorian, Arity::Triad) => &DORIAN_TRIADS,
            (ScaleType::Dorian, Arity::Tetrad) => &DORIAN_TETRADS,
            (ScaleType::Phrygian, Arity::Triad) => &PHRYGIAN_TRIADS,
            (ScaleType::Phrygian, Arity::Tetrad) => &PHRYGIAN_TETRADS,
            (ScaleType::Lydian, Arity::Triad) => &LYDIAN_TRIADS,
            (ScaleType::Lydian, Arity::Tetrad) => &LYDIAN_TETRADS,
            (ScaleType::Mixolydian, Arity::Triad) => &MIXOLYDIAN_TRIADS,
            (ScaleType::Mixolydian, Arity::Tetrad) => &MIXOLYDIAN_TETRADS,
            (ScaleType::Aeolian, Arity::Triad) => &AEOLIAN_TRIADS,
            (ScaleType::Aeolian, Arity::Tetrad) => &AEOLIAN_TETRADS,
            (ScaleType::Locrian, Arity::Triad) => &LOCRIAN_TRIADS,
            (ScaleType::Locrian, Arity::Tetrad) => &LOCRIAN_TETRADS,
            (ScaleType::HarmonicMinor, Arity::Triad) => &HARMONIC_MINOR_TRIADS,
            (ScaleType::HarmonicMinor, Arity::Tetrad) => &HARMONIC_MINOR_TETRADS,
            (ScaleType::MelodicMinor, Arity::Triad) => &MELODIC_MINOR_TRIADS,
            (ScaleType::MelodicMinor, Arity::Tetrad) => &MELODIC_MINOR_TETRADS,
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ScaleType {
    type Err = Error;

    /// Case-insensitive; accepts tags, three-letter abbreviations, and
    /// common aliases. Separators (`-`, `_`, space) are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "ion" | "ionian" | "maj" | "major" => Ok(ScaleType::Ionian),
            "dor" | "dorian" => Ok(ScaleType::Dorian),
            "phr" | "phrygian" => Ok(ScaleType::Phrygian),
            "lyd" | "lydian" => Ok(ScaleType::Lydian),
            "mix" | "mixolydian" => Ok(ScaleType::Mixolydian),
            "aeo" | "aeolian" | "min" | "minor" | "naturalminor" => Ok(ScaleType::Aeolian),
            "loc" | "locrian" => Ok(ScaleType::Locrian),
            "harmonicminor" | "harm" | "hmin" => Ok(ScaleType::HarmonicMinor),
            "melodicminor" | "mel" | "mmin" => Ok(ScaleType::MelodicMinor),
            _ => Err(Error::InvalidScaleType(s.to_string())),
        }
    }
}
