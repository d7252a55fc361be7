//! # Tone-Set Resolver
//!
//! Turns a declarative chord or scale descriptor (root + interval list) into
//! an ordered pitch-class tone list. Index 0 is always the root/tonic and is
//! treated specially by downstream consumers (highlighted differently,
//! anchors the pentatonic box).
//!
//! ## Supported Chord Types
//! - **Major**: `C`, `maj`, `M` → root, major 3rd, perfect 5th
//! - **Minor**: `m`, `min`, `-` → root, minor 3rd, perfect 5th
//! - **Dominant 7th**: `7` → root, major 3rd, perfect 5th, minor 7th
//! - **Major 7th**: `maj7`, `M7` → root, major 3rd, perfect 5th, major 7th
//! - **Minor 7th**: `m7`, `min7`, `-7` → root, minor 3rd, perfect 5th, minor 7th
//! - **Half-diminished**: `m7b5`, `ø` → root, minor 3rd, diminished 5th, minor 7th
//! - **Diminished**: `dim`, `°` (and `dim7`) → stacked minor 3rds
//! - **Augmented**: `aug`, `+` → root, major 3rd, augmented 5th
//! - **Sus**: `sus2`, `sus4` → 3rd replaced by a 2nd / 4th
//! - **Sixths**: `6`, `m6` → triad + major 6th
//! - **Ninths**: `9`, `maj9`, `m9` → 7th chord + major 9th
//!
//! An unknown quality is an [`FretError::InvalidChordSymbol`], not a silent
//! fall-back — the engine never guesses at a caller's harmony.

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::pitch::PitchClass;

/// An ordered, root-first sequence of pitch classes: a chord's tones or a
/// scale's degrees. Ordering matters; equality-of-contents is not
/// equality-of-meaning when the root differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToneSet {
    tones: Vec<PitchClass>,
}

impl ToneSet {
    /// Build a tone set from a root and a semitone-interval pattern
    /// (interval 0 yields the root itself).
    pub fn from_intervals(root: PitchClass, intervals: &[u8]) -> Self {
        ToneSet {
            tones: intervals
                .iter()
                .map(|&iv| root.transpose(iv as i8))
                .collect(),
        }
    }

    /// Parse a chord symbol like `C`, `Am7`, `F#m7b5`, or `Bbmaj9`.
    ///
    /// The root is one letter plus an optional single accidental; the rest is
    /// the quality.
    ///
    /// # Errors
    /// [`FretError::InvalidChordSymbol`] when the root letter or the quality
    /// is unrecognized.
    pub fn from_chord_symbol(symbol: &str) -> Result<Self, FretError> {
        let trimmed = symbol.trim();
        let mut root_len = match trimmed.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => 1,
            _ => return Err(FretError::InvalidChordSymbol(symbol.to_string())),
        };
        if matches!(trimmed[root_len..].chars().next(), Some('#') | Some('b')) {
            root_len += 1;
        }

        let root = PitchClass::parse(&trimmed[..root_len])
            .map_err(|_| FretError::InvalidChordSymbol(symbol.to_string()))?;
        let quality = &trimmed[root_len..];

        let intervals: &[u8] = match quality {
            "" | "maj" | "M" => &[0, 4, 7],
            "m" | "min" | "-" => &[0, 3, 7],
            "7" => &[0, 4, 7, 10],
            "maj7" | "M7" => &[0, 4, 7, 11],
            "m7" | "min7" | "-7" => &[0, 3, 7, 10],
            "m7b5" | "ø" => &[0, 3, 6, 10],
            "dim" | "°" => &[0, 3, 6],
            "dim7" => &[0, 3, 6, 9],
            "aug" | "+" => &[0, 4, 8],
            "sus4" => &[0, 5, 7],
            "sus2" => &[0, 2, 7],
            "6" => &[0, 4, 7, 9],
            "m6" => &[0, 3, 7, 9],
            "9" => &[0, 4, 7, 10, 14],
            "maj9" | "M9" => &[0, 4, 7, 11, 14],
            "m9" | "min9" => &[0, 3, 7, 10, 14],
            _ => return Err(FretError::InvalidChordSymbol(symbol.to_string())),
        };

        Ok(ToneSet::from_intervals(root, intervals))
    }

    /// The root/tonic, if the set is non-empty.
    pub fn root(&self) -> Option<PitchClass> {
        self.tones.first().copied()
    }

    pub fn tones(&self) -> &[PitchClass] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.tones.contains(&pc)
    }

    /// Pitch classes present in `self` but absent from `other`, in `self`
    /// order, without duplicates.
    pub fn difference(&self, other: &ToneSet) -> Vec<PitchClass> {
        let mut out = Vec::new();
        for &pc in &self.tones {
            if !other.contains(pc) && !out.contains(&pc) {
                out.push(pc);
            }
        }
        out
    }
}

/// The musical scales the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

impl Scale {
    /// All available scales, for iteration by catalog-style consumers.
    pub const ALL: [Scale; 12] = [
        Scale::Ionian,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::Aeolian,
        Scale::Locrian,
        Scale::HarmonicMinor,
        Scale::MelodicMinor,
        Scale::MajorPentatonic,
        Scale::MinorPentatonic,
        Scale::Blues,
    ];

    /// Semitone intervals from the root, ascending.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Scale::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Scale::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Scale::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Scale::MajorPentatonic => &[0, 2, 4, 7, 9],
            Scale::MinorPentatonic => &[0, 3, 5, 7, 10],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }

    /// The scale's degrees rooted at `root`, ascending, root first.
    pub fn tone_set(self, root: PitchClass) -> ToneSet {
        ToneSet::from_intervals(root, self.intervals())
    }

    /// Parse a scale name as it would appear on a CLI or in a descriptor.
    ///
    /// # Errors
    /// [`FretError::UnknownScale`] for names outside the catalog.
    pub fn parse(name: &str) -> Result<Self, FretError> {
        let normalized = name.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "major" | "ionian" => Ok(Scale::Ionian),
            "dorian" => Ok(Scale::Dorian),
            "phrygian" => Ok(Scale::Phrygian),
            "lydian" => Ok(Scale::Lydian),
            "mixolydian" => Ok(Scale::Mixolydian),
            "minor" | "natural-minor" | "aeolian" => Ok(Scale::Aeolian),
            "locrian" => Ok(Scale::Locrian),
            "harmonic-minor" => Ok(Scale::HarmonicMinor),
            "melodic-minor" => Ok(Scale::MelodicMinor),
            "major-pentatonic" => Ok(Scale::MajorPentatonic),
            "minor-pentatonic" => Ok(Scale::MinorPentatonic),
            "blues" => Ok(Scale::Blues),
            _ => Err(FretError::UnknownScale(name.to_string())),
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scale::Ionian => "Major (Ionian)",
            Scale::Dorian => "Dorian",
            Scale::Phrygian => "Phrygian",
            Scale::Lydian => "Lydian",
            Scale::Mixolydian => "Mixolydian",
            Scale::Aeolian => "Minor (Aeolian)",
            Scale::Locrian => "Locrian",
            Scale::HarmonicMinor => "Harmonic Minor",
            Scale::MelodicMinor => "Melodic Minor",
            Scale::MajorPentatonic => "Major Pentatonic",
            Scale::MinorPentatonic => "Minor Pentatonic",
            Scale::Blues => "Blues",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(name: &str) -> PitchClass {
        PitchClass::parse(name).unwrap()
    }

    fn chromas(set: &ToneSet) -> Vec<u8> {
        set.tones().iter().map(|t| t.value()).collect()
    }

    #[test]
    fn test_chord_symbol_major() {
        let c = ToneSet::from_chord_symbol("C").unwrap();
        assert_eq!(chromas(&c), vec![0, 4, 7]);
        assert_eq!(c.root(), Some(pc("C")));
    }

    #[test]
    fn test_chord_symbol_minor_seventh() {
        let am7 = ToneSet::from_chord_symbol("Am7").unwrap();
        assert_eq!(chromas(&am7), vec![9, 0, 4, 7]);
    }

    #[test]
    fn test_chord_symbol_with_accidental() {
        let fsharp = ToneSet::from_chord_symbol("F#m7b5").unwrap();
        assert_eq!(chromas(&fsharp), vec![6, 9, 0, 4]);
        let bb = ToneSet::from_chord_symbol("Bbmaj7").unwrap();
        assert_eq!(chromas(&bb), vec![10, 2, 5, 9]);
    }

    #[test]
    fn test_chord_symbol_ninth_wraps_octave() {
        // 9th interval (14 semitones) folds to a 2nd in pitch-class space
        let c9 = ToneSet::from_chord_symbol("C9").unwrap();
        assert_eq!(chromas(&c9), vec![0, 4, 7, 10, 2]);
    }

    #[test]
    fn test_chord_symbol_rejects_unknown_quality() {
        assert_eq!(
            ToneSet::from_chord_symbol("Cmaj42"),
            Err(FretError::InvalidChordSymbol("Cmaj42".to_string()))
        );
        assert!(ToneSet::from_chord_symbol("").is_err());
        assert!(ToneSet::from_chord_symbol("H7").is_err());
    }

    #[test]
    fn test_scale_tone_set_root_first() {
        let a_minor_pent = Scale::MinorPentatonic.tone_set(pc("A"));
        assert_eq!(chromas(&a_minor_pent), vec![9, 0, 2, 4, 7]);
    }

    #[test]
    fn test_scale_parse_aliases() {
        assert_eq!(Scale::parse("major").unwrap(), Scale::Ionian);
        assert_eq!(Scale::parse("Natural Minor").unwrap(), Scale::Aeolian);
        assert_eq!(Scale::parse("minor_pentatonic").unwrap(), Scale::MinorPentatonic);
        assert!(Scale::parse("klezmer").is_err());
    }

    #[test]
    fn test_difference() {
        let a_harmonic = Scale::HarmonicMinor.tone_set(pc("A"));
        let a_pent = Scale::MinorPentatonic.tone_set(pc("A"));
        // Harmonic minor adds B, F, G# over the pentatonic
        let ext = a_harmonic.difference(&a_pent);
        assert_eq!(ext, vec![pc("B"), pc("F"), pc("G#")]);
        // The pentatonic's G is foreign to harmonic minor
        let conflict = a_pent.difference(&a_harmonic);
        assert_eq!(conflict, vec![pc("G")]);
    }
}
