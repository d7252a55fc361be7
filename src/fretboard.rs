//! # Fretboard Geometry
//!
//! Given a tuning and string count, computes the pitch class sounded at any
//! (string, fret) pair and scans a string/fret range for positions matching a
//! target tone set. This is the shared substrate both search modules build
//! on: arpeggio search and the pentatonic box locator never touch note names,
//! only positions and pitch classes.
//!
//! All functions here are pure; a `Tuning` is immutable for the duration of
//! any computation and nothing is cached between calls.

use serde::{Deserialize, Serialize};

use crate::error::FretError;
use crate::pitch::PitchClass;
use crate::theory::ToneSet;

/// A (string, fret) coordinate on the instrument.
///
/// String 0 is the lowest-pitched string. Two positions are distinct if
/// either coordinate differs, even when they sound the same pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FretPosition {
    pub string: usize,
    pub fret: u8,
}

impl FretPosition {
    pub fn new(string: usize, fret: u8) -> Self {
        FretPosition { string, fret }
    }
}

/// Ordered open-string pitch classes, index 0 at the lowest-pitched string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tuning {
    open_strings: Vec<PitchClass>,
}

impl Tuning {
    /// Build a tuning from open-string pitch classes, lowest string first.
    ///
    /// # Errors
    /// [`FretError::InvalidTuning`] when the list is empty.
    pub fn new(open_strings: Vec<PitchClass>) -> Result<Self, FretError> {
        if open_strings.is_empty() {
            return Err(FretError::InvalidTuning(
                "tuning must have at least one string".to_string(),
            ));
        }
        Ok(Tuning { open_strings })
    }

    /// Build a tuning from note names, normalizing each through the pitch
    /// model (the engine never trusts spelling for equality).
    pub fn from_note_names<S: AsRef<str>>(names: &[S]) -> Result<Self, FretError> {
        let open_strings = names
            .iter()
            .map(|n| PitchClass::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Tuning::new(open_strings)
    }

    /// Standard 6-string guitar: E A D G B E, low to high.
    pub fn standard_guitar() -> Self {
        Tuning::from_note_names(&["E", "A", "D", "G", "B", "E"]).unwrap()
    }

    /// Standard 4-string bass: E A D G, low to high.
    pub fn standard_bass() -> Self {
        Tuning::from_note_names(&["E", "A", "D", "G"]).unwrap()
    }

    pub fn string_count(&self) -> usize {
        self.open_strings.len()
    }

    pub fn open_strings(&self) -> &[PitchClass] {
        &self.open_strings
    }

    /// The pitch class sounded at a position: `(open + fret) mod 12`.
    ///
    /// Total for every in-range string index and any fret number; octave
    /// folding means `pitch_at` at fret `f` and fret `f + 12` agree.
    pub fn pitch_at(&self, pos: FretPosition) -> PitchClass {
        self.open_strings[pos.string].transpose((pos.fret % 12) as i8)
    }

    /// All frets in `min_fret..=max_fret` on one string that sound any of
    /// `tones`, ascending.
    pub fn scan_string(
        &self,
        string: usize,
        min_fret: u8,
        max_fret: u8,
        tones: &[PitchClass],
    ) -> Vec<u8> {
        (min_fret..=max_fret)
            .filter(|&fret| tones.contains(&self.pitch_at(FretPosition::new(string, fret))))
            .collect()
    }
}

/// For every tone in the set, every position in
/// `[0, string_count) x [0, max_fret]` sounding that tone's pitch class, in
/// increasing (string, fret) order. Index `i` of the result corresponds to
/// tone `i` of the set.
///
/// Runtime is O(strings x frets x tones); interactive at typical sizes
/// (<= 8 strings, <= 24 frets).
pub fn scan_for_tone_set(
    tone_set: &ToneSet,
    tuning: &Tuning,
    max_fret: u8,
) -> Vec<Vec<FretPosition>> {
    tone_set
        .tones()
        .iter()
        .map(|&tone| {
            let mut positions = Vec::new();
            for string in 0..tuning.string_count() {
                for fret in 0..=max_fret {
                    let pos = FretPosition::new(string, fret);
                    if tuning.pitch_at(pos) == tone {
                        positions.push(pos);
                    }
                }
            }
            positions
        })
        .collect()
}

/// Instrument geometry as consumed from a YAML description:
///
/// ```yaml
/// name: Baritone
/// tuning: [B, E, A, D, F#, B]
/// frets: 22
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    #[serde(default)]
    pub name: Option<String>,
    pub tuning: Vec<String>,
    pub frets: u8,
}

impl Instrument {
    /// Parse a YAML instrument description.
    ///
    /// # Errors
    /// [`FretError::InstrumentConfig`] for malformed YAML;
    /// [`FretError::InvalidNoteName`] / [`FretError::InvalidTuning`] when the
    /// tuning entries don't resolve.
    pub fn from_yaml(source: &str) -> Result<Self, FretError> {
        serde_yaml::from_str(source).map_err(|e| FretError::InstrumentConfig(e.to_string()))
    }

    /// Resolve the note-name tuning through the pitch model.
    pub fn tuning(&self) -> Result<Tuning, FretError> {
        Tuning::from_note_names(&self.tuning)
    }

    /// Standard 6-string guitar with 22 frets.
    pub fn standard_guitar() -> Self {
        Instrument {
            name: Some("Guitar".to_string()),
            tuning: ["E", "A", "D", "G", "B", "E"].map(String::from).to_vec(),
            frets: 22,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Scale;

    fn pc(name: &str) -> PitchClass {
        PitchClass::parse(name).unwrap()
    }

    #[test]
    fn test_pitch_at_standard_guitar() {
        let tuning = Tuning::standard_guitar();
        // Open low E
        assert_eq!(tuning.pitch_at(FretPosition::new(0, 0)), pc("E"));
        // A string fret 3 = C
        assert_eq!(tuning.pitch_at(FretPosition::new(1, 3)), pc("C"));
        // B string fret 1 = C
        assert_eq!(tuning.pitch_at(FretPosition::new(4, 1)), pc("C"));
    }

    #[test]
    fn test_pitch_at_octave_invariant() {
        let tuning = Tuning::standard_guitar();
        for string in 0..tuning.string_count() {
            for fret in 0..12 {
                assert_eq!(
                    tuning.pitch_at(FretPosition::new(string, fret)),
                    tuning.pitch_at(FretPosition::new(string, fret + 12)),
                );
            }
        }
    }

    #[test]
    fn test_scan_order_and_membership() {
        let tuning = Tuning::standard_guitar();
        let c_major = ToneSet::from_chord_symbol("C").unwrap();
        let scan = scan_for_tone_set(&c_major, &tuning, 12);
        assert_eq!(scan.len(), 3);
        for (tone_idx, positions) in scan.iter().enumerate() {
            let tone = c_major.tones()[tone_idx];
            // Every listed position sounds the tone, in (string, fret) order
            for pair in positions.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            for &pos in positions {
                assert_eq!(tuning.pitch_at(pos), tone);
            }
        }
        // C on the A string at fret 3 is the first C past the low E string
        assert!(scan[0].contains(&FretPosition::new(1, 3)));
    }

    #[test]
    fn test_scan_string() {
        let tuning = Tuning::standard_guitar();
        let tones = Scale::MinorPentatonic.tone_set(pc("A"));
        // Low E string, A minor pentatonic: G(3) A(5) C(8) D(10) E(12)...
        let frets = tuning.scan_string(0, 0, 12, tones.tones());
        assert_eq!(frets, vec![0, 3, 5, 8, 10, 12]);
    }

    #[test]
    fn test_empty_tuning_rejected() {
        assert!(Tuning::new(vec![]).is_err());
    }

    #[test]
    fn test_instrument_from_yaml() {
        let yaml = "name: Bass\ntuning: [E, A, D, G]\nfrets: 20\n";
        let instrument = Instrument::from_yaml(yaml).unwrap();
        assert_eq!(instrument.frets, 20);
        let tuning = instrument.tuning().unwrap();
        assert_eq!(tuning, Tuning::standard_bass());
    }

    #[test]
    fn test_instrument_bad_yaml() {
        assert!(matches!(
            Instrument::from_yaml("tuning: 12"),
            Err(FretError::InstrumentConfig(_))
        ));
    }
}
