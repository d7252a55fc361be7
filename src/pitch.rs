//! # Pitch Model
//!
//! Canonicalizes note spellings to a 12-value pitch class (chroma) so that
//! enharmonic spelling differences never break equality checks. Every note
//! name entering the engine — from a caller, a chord symbol, or a tuning
//! description — is normalized through [`PitchClass::parse`] before any
//! geometric comparison; no module compares note-name strings.

use serde::{Deserialize, Serialize};

use crate::error::FretError;

/// A note's identity modulo octave: an integer 0–11, where 0 = C.
///
/// Equality is exact integer equality. `F##`, `G`, and `Abb` all parse to the
/// same `PitchClass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

/// Preferred spelling for cosmetic display names.
///
/// Purely presentational; the engine never uses display names for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    Sharps,
    Flats,
}

/// Semitone offset from C for each natural note letter.
fn letter_semitone(letter: char) -> Option<i16> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

impl PitchClass {
    /// Build a pitch class from any integer chroma, folding into 0–11.
    pub fn new(value: u8) -> Self {
        PitchClass(value % 12)
    }

    /// The raw chroma value, 0–11.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Parse a note-name spelling into its canonical pitch class.
    ///
    /// Accepts a letter `A`–`G` followed by an optional accidental: `#`,
    /// `##` or `x` (double sharp), `b`, or `bb`. Any accepted spelling maps
    /// to the same integer as its enharmonic equivalent:
    ///
    /// ```
    /// use fretmap::PitchClass;
    ///
    /// assert_eq!(PitchClass::parse("F##").unwrap(), PitchClass::parse("G").unwrap());
    /// assert_eq!(PitchClass::parse("Cb").unwrap(), PitchClass::parse("B").unwrap());
    /// ```
    ///
    /// # Errors
    /// Returns [`FretError::InvalidNoteName`] for anything else — an
    /// unrecognized spelling is a caller error, never coerced to a default.
    pub fn parse(name: &str) -> Result<Self, FretError> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| FretError::InvalidNoteName(name.to_string()))?;
        let base = letter_semitone(letter.to_ascii_uppercase())
            .ok_or_else(|| FretError::InvalidNoteName(name.to_string()))?;

        let accidental: i16 = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "##" | "x" => 2,
            "b" => -1,
            "bb" => -2,
            _ => return Err(FretError::InvalidNoteName(name.to_string())),
        };

        Ok(PitchClass((base + accidental).rem_euclid(12) as u8))
    }

    /// Transpose by a (possibly negative) number of semitones, wrapping
    /// within the octave.
    pub fn transpose(self, semitones: i8) -> Self {
        PitchClass((self.0 as i16 + semitones as i16).rem_euclid(12) as u8)
    }

    /// Cosmetic display name under a preferred spelling.
    ///
    /// The inverse of [`parse`](Self::parse) up to enharmonic choice;
    /// `parse(pc.display_name(s))` always returns `pc`.
    pub fn display_name(self, spelling: Spelling) -> &'static str {
        let prefer_flat = spelling == Spelling::Flats;
        match self.0 {
            0 => "C",
            1 => if prefer_flat { "Db" } else { "C#" },
            2 => "D",
            3 => if prefer_flat { "Eb" } else { "D#" },
            4 => "E",
            5 => "F",
            6 => if prefer_flat { "Gb" } else { "F#" },
            7 => "G",
            8 => if prefer_flat { "Ab" } else { "G#" },
            9 => "A",
            10 => if prefer_flat { "Bb" } else { "A#" },
            11 => "B",
            _ => unreachable!(),
        }
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name(Spelling::Sharps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naturals() {
        assert_eq!(PitchClass::parse("C").unwrap().value(), 0);
        assert_eq!(PitchClass::parse("E").unwrap().value(), 4);
        assert_eq!(PitchClass::parse("B").unwrap().value(), 11);
    }

    #[test]
    fn test_parse_accidentals() {
        assert_eq!(PitchClass::parse("C#").unwrap().value(), 1);
        assert_eq!(PitchClass::parse("Bb").unwrap().value(), 10);
        assert_eq!(PitchClass::parse("Cb").unwrap().value(), 11); // wraps below C
    }

    #[test]
    fn test_enharmonic_equivalence() {
        // Double accidentals canonicalize to the simpler spelling's chroma
        assert_eq!(
            PitchClass::parse("F##").unwrap(),
            PitchClass::parse("G").unwrap()
        );
        assert_eq!(
            PitchClass::parse("Gx").unwrap(),
            PitchClass::parse("A").unwrap()
        );
        assert_eq!(
            PitchClass::parse("Dbb").unwrap(),
            PitchClass::parse("C").unwrap()
        );
        assert_eq!(
            PitchClass::parse("E#").unwrap(),
            PitchClass::parse("F").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PitchClass::parse("H").is_err());
        assert!(PitchClass::parse("").is_err());
        assert!(PitchClass::parse("C###").is_err());
        assert!(PitchClass::parse("7").is_err());
    }

    #[test]
    fn test_transpose_wraps() {
        let b = PitchClass::parse("B").unwrap();
        assert_eq!(b.transpose(1).value(), 0);
        let c = PitchClass::parse("C").unwrap();
        assert_eq!(c.transpose(-1).value(), 11);
        assert_eq!(c.transpose(-13).value(), 11);
    }

    #[test]
    fn test_display_name_round_trip() {
        // parse(display_name(parse(n))) == parse(n) for every chroma and spelling
        for chroma in 0..12 {
            let pc = PitchClass::new(chroma);
            for spelling in [Spelling::Sharps, Spelling::Flats] {
                let name = pc.display_name(spelling);
                assert_eq!(PitchClass::parse(name).unwrap(), pc);
            }
        }
    }
}
