//! Note spelling and chord-name parsing using winnow combinators.

use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::chord::ChordQuality;
use crate::pitch::{Letter, SpelledNote};

type PResult<T> = winnow::ModalResult<T>;

/// More accidentals than this is not a spelling anyone writes.
const MAX_ACCIDENTALS: usize = 4;

/// Parse a letter name (either case)
pub fn parse_letter(input: &mut &str) -> PResult<Letter> {
    let c = one_of([
        'C', 'D', 'E', 'F', 'G', 'A', 'B', 'c', 'd', 'e', 'f', 'g', 'a', 'b',
    ])
    .parse_next(input)?;
    Ok(match c.to_ascii_uppercase() {
        'C' => Letter::C,
        'D' => Letter::D,
        'E' => Letter::E,
        'F' => Letter::F,
        'G' => Letter::G,
        'A' => Letter::A,
        _ => Letter::B,
    })
}

/// Parse a run of sharps or a run of flats, never a mix.
pub fn parse_accidentals(input: &mut &str) -> PResult<i8> {
    let sharps: &str = take_while(0..=MAX_ACCIDENTALS, '#').parse_next(input)?;
    if !sharps.is_empty() {
        return Ok(sharps.len() as i8);
    }
    let flats: &str = take_while(0..=MAX_ACCIDENTALS, 'b').parse_next(input)?;
    Ok(-(flats.len() as i8))
}

/// Parse a spelled note such as `C`, `Eb`, `F##`
pub fn parse_spelling(input: &mut &str) -> PResult<SpelledNote> {
    let letter = parse_letter(input)?;
    let accidentals = parse_accidentals(input)?;
    Ok(SpelledNote::new(letter, accidentals))
}

/// Seventh-chord suffixes, longest first so prefixes don't shadow them.
fn parse_tetrad_suffix(input: &mut &str) -> PResult<ChordQuality> {
    alt((
        "m(maj7)".value(ChordQuality::MinorMajor7),
        "mMaj7".value(ChordQuality::MinorMajor7),
        "mmaj7".value(ChordQuality::MinorMajor7),
        "m7(b5)".value(ChordQuality::HalfDiminished7),
        "m7b5".value(ChordQuality::HalfDiminished7),
        "ø7".value(ChordQuality::HalfDiminished7),
        "m7".value(ChordQuality::Minor7),
        "maj7(#5)".value(ChordQuality::AugmentedMajor7),
        "maj7#5".value(ChordQuality::AugmentedMajor7),
        "maj7".value(ChordQuality::Major7),
        "dim7".value(ChordQuality::Diminished7),
        "°7".value(ChordQuality::Diminished7),
        "dom7".value(ChordQuality::Dominant7),
        "7".value(ChordQuality::Dominant7),
    ))
    .parse_next(input)
}

fn parse_triad_suffix(input: &mut &str) -> PResult<ChordQuality> {
    alt((
        "maj".value(ChordQuality::Major),
        "m".value(ChordQuality::Minor),
        "dim".value(ChordQuality::Diminished),
        "°".value(ChordQuality::Diminished),
        "aug".value(ChordQuality::Augmented),
        "+".value(ChordQuality::Augmented),
    ))
    .parse_next(input)
}

/// Parse a quality suffix; no suffix means a major triad.
pub fn parse_quality_suffix(input: &mut &str) -> PResult<ChordQuality> {
    let quality = opt(alt((parse_tetrad_suffix, parse_triad_suffix))).parse_next(input)?;
    Ok(quality.unwrap_or(ChordQuality::Major))
}

/// Parse a rendered chord name such as `C#m7` or `Bb°`
pub fn parse_chord_name(input: &mut &str) -> PResult<(SpelledNote, ChordQuality)> {
    let root = parse_spelling(input)?;
    let quality = parse_quality_suffix(input)?;
    Ok((root, quality))
}

/// Run `parser` over the whole of `input`, rejecting trailing text.
fn complete<T>(input: &str, mut parser: impl FnMut(&mut &str) -> PResult<T>) -> Option<T> {
    let mut rest = input.trim();
    let value = parser(&mut rest).ok()?;
    rest.is_empty().then_some(value)
}

pub(crate) fn spelling(input: &str) -> Option<SpelledNote> {
    complete(input, parse_spelling)
}

pub(crate) fn chord_name(input: &str) -> Option<(SpelledNote, ChordQuality)> {
    complete(input, parse_chord_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_accidentals() {
        let mut input = "##x";
        assert_eq!(parse_accidentals(&mut input).unwrap(), 2);
        assert_eq!(input, "x");

        let mut input = "bbm";
        assert_eq!(parse_accidentals(&mut input).unwrap(), -2);
        assert_eq!(input, "m");

        let mut input = "m7";
        assert_eq!(parse_accidentals(&mut input).unwrap(), 0);
        assert_eq!(input, "m7");
    }

    #[test]
    fn test_spelling_rejects_mixed_accidentals() {
        assert_eq!(spelling("C#b"), None);
        assert_eq!(spelling("Cb#"), None);
        assert_eq!(spelling("C#####"), None);
    }

    #[test]
    fn test_spelling_trims_whitespace() {
        assert_eq!(spelling("  Eb "), Some(SpelledNote::new(Letter::E, -1)));
    }

    #[test]
    fn test_chord_name_suffixes() {
        let cases = [
            ("C", ChordQuality::Major),
            ("Cm", ChordQuality::Minor),
            ("C°", ChordQuality::Diminished),
            ("Cdim", ChordQuality::Diminished),
            ("C+", ChordQuality::Augmented),
            ("Cmaj7", ChordQuality::Major7),
            ("Cm7", ChordQuality::Minor7),
            ("C7", ChordQuality::Dominant7),
            ("Cm7(b5)", ChordQuality::HalfDiminished7),
            ("Cø7", ChordQuality::HalfDiminished7),
            ("Cm(maj7)", ChordQuality::MinorMajor7),
            ("Cmaj7(#5)", ChordQuality::AugmentedMajor7),
            ("C°7", ChordQuality::Diminished7),
            ("Cdim7", ChordQuality::Diminished7),
        ];
        for (name, quality) in cases {
            let (root, parsed) = chord_name(name).unwrap_or_else(|| panic!("{name} failed"));
            assert_eq!(root, SpelledNote::new(Letter::C, 0), "{name}");
            assert_eq!(parsed, quality, "{name}");
        }
    }

    #[test]
    fn test_flat_root_before_suffix() {
        let (root, quality) = chord_name("Bbm7").unwrap();
        assert_eq!(root, SpelledNote::new(Letter::B, -1));
        assert_eq!(quality, ChordQuality::Minor7);
    }

    #[test]
    fn test_chord_name_rejects_garbage() {
        assert_eq!(chord_name("Cxyz"), None);
        assert_eq!(chord_name("m7"), None);
        assert_eq!(chord_name(""), None);
    }
}
