//! # Mode Extension Resolver
//!
//! Computes which additional pitch classes turn a pentatonic box into a
//! named 7-note mode or other target scale, and — when the pentatonic is not
//! a pure subset of the target — which pentatonic tones must be suppressed
//! from display rather than mislabeled as part of the target scale.

use serde::Serialize;

use crate::fretboard::{FretPosition, Tuning};
use crate::pentatonic::PentatonicBox;
use crate::pitch::PitchClass;
use crate::theory::ToneSet;

/// Extension positions are scanned one fret beyond the box on each side.
const EXTENSION_FRET_MARGIN: u8 = 1;

/// The relationship between a pentatonic box and a target scale.
///
/// After conflict filtering, `filtered_box_positions` and
/// `extension_positions` together cover exactly the target scale's pitch
/// classes within the box window, and the two tone sets are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxExtension {
    /// Target-scale tones absent from the pentatonic, in target order.
    pub extension_tones: Vec<PitchClass>,
    /// Pentatonic tones foreign to the target scale; non-empty means the
    /// pentatonic is not a pure subset of the target.
    pub conflict_tones: Vec<PitchClass>,
    /// Positions sounding an extension tone within the box window.
    pub extension_positions: Vec<FretPosition>,
    /// The box's own positions with conflict-tone positions removed.
    pub filtered_box_positions: Vec<FretPosition>,
}

/// Relate a pentatonic box to a target scale.
///
/// `extension_tones` is the pitch-class difference target − pentatonic;
/// `conflict_tones` the reverse. Extension positions are scanned per string
/// over the box's fret window widened by one fret on each side. An empty
/// difference (the pentatonic already realizes the target texture) yields no
/// extension positions, and an empty box yields an all-empty result.
pub fn resolve_extension(
    boxed: &PentatonicBox,
    pentatonic: &ToneSet,
    target: &ToneSet,
    tuning: &Tuning,
) -> BoxExtension {
    let extension_tones = target.difference(pentatonic);
    let conflict_tones = pentatonic.difference(target);

    let filtered_box_positions = if conflict_tones.is_empty() {
        boxed.positions.clone()
    } else {
        boxed
            .positions
            .iter()
            .filter(|&&pos| !conflict_tones.contains(&tuning.pitch_at(pos)))
            .copied()
            .collect()
    };

    let extension_positions = match (boxed.min_fret(), boxed.max_fret()) {
        (Some(min), Some(max)) if !extension_tones.is_empty() => {
            let low = min.saturating_sub(EXTENSION_FRET_MARGIN);
            let high = max + EXTENSION_FRET_MARGIN;
            let mut positions = Vec::new();
            for string in 0..tuning.string_count() {
                for fret in tuning.scan_string(string, low, high, &extension_tones) {
                    positions.push(FretPosition::new(string, fret));
                }
            }
            positions
        }
        _ => Vec::new(),
    };

    BoxExtension {
        extension_tones,
        conflict_tones,
        extension_positions,
        filtered_box_positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pentatonic::pentatonic_box;
    use crate::theory::Scale;

    fn pc(name: &str) -> PitchClass {
        PitchClass::parse(name).unwrap()
    }

    #[test]
    fn test_pure_subset_has_no_conflicts() {
        // A minor pentatonic is a subset of A aeolian
        let tuning = Tuning::standard_guitar();
        let pent = Scale::MinorPentatonic.tone_set(pc("A"));
        let target = Scale::Aeolian.tone_set(pc("A"));
        let boxed = pentatonic_box(&pent, &tuning, 0);
        let ext = resolve_extension(&boxed, &pent, &target, &tuning);

        assert_eq!(ext.extension_tones, vec![pc("B"), pc("F")]);
        assert!(ext.conflict_tones.is_empty());
        assert_eq!(ext.filtered_box_positions, boxed.positions);
        assert!(!ext.extension_positions.is_empty());
        for &pos in &ext.extension_positions {
            assert!(ext.extension_tones.contains(&tuning.pitch_at(pos)));
        }
    }

    #[test]
    fn test_harmonic_minor_conflicts_with_flat_seventh() {
        // A minor pentatonic vs. A harmonic minor: the pentatonic's G is
        // foreign to the target and must be hidden from the displayed box.
        let tuning = Tuning::standard_guitar();
        let pent = Scale::MinorPentatonic.tone_set(pc("A"));
        let target = Scale::HarmonicMinor.tone_set(pc("A"));
        let boxed = pentatonic_box(&pent, &tuning, 0);
        let ext = resolve_extension(&boxed, &pent, &target, &tuning);

        assert_eq!(ext.conflict_tones, vec![pc("G")]);
        assert!(ext.extension_tones.contains(&pc("G#")));
        assert!(ext.extension_tones.contains(&pc("F")));
        for &pos in &ext.filtered_box_positions {
            assert_ne!(tuning.pitch_at(pos), pc("G"));
        }
        assert!(ext.filtered_box_positions.len() < boxed.positions.len());
    }

    #[test]
    fn test_subset_law() {
        // Filtered box tones plus extension tones cover the target exactly,
        // and the two sets are disjoint.
        let tuning = Tuning::standard_guitar();
        let pent = Scale::MinorPentatonic.tone_set(pc("A"));
        for target in [
            Scale::Aeolian.tone_set(pc("A")),
            Scale::Dorian.tone_set(pc("A")),
            Scale::HarmonicMinor.tone_set(pc("A")),
        ] {
            let boxed = pentatonic_box(&pent, &tuning, 0);
            let ext = resolve_extension(&boxed, &pent, &target, &tuning);

            let mut covered: Vec<PitchClass> = ext
                .filtered_box_positions
                .iter()
                .map(|&p| tuning.pitch_at(p))
                .collect();
            covered.extend(ext.extension_tones.iter().copied());
            for &tone in target.tones() {
                assert!(covered.contains(&tone));
            }
            for &tone in &ext.extension_tones {
                assert!(!ext
                    .filtered_box_positions
                    .iter()
                    .any(|&p| tuning.pitch_at(p) == tone));
            }
        }
    }

    #[test]
    fn test_identical_target_is_degenerate() {
        let tuning = Tuning::standard_guitar();
        let pent = Scale::MinorPentatonic.tone_set(pc("A"));
        let boxed = pentatonic_box(&pent, &tuning, 0);
        let ext = resolve_extension(&boxed, &pent, &pent.clone(), &tuning);
        assert!(ext.extension_tones.is_empty());
        assert!(ext.extension_positions.is_empty());
        assert_eq!(ext.filtered_box_positions, boxed.positions);
    }

    #[test]
    fn test_empty_box_yields_empty_result() {
        let tuning = Tuning::standard_guitar();
        let pent = Scale::MinorPentatonic.tone_set(pc("A"));
        let target = Scale::Aeolian.tone_set(pc("A"));
        let boxed = PentatonicBox::empty(0);
        let ext = resolve_extension(&boxed, &pent, &target, &tuning);
        assert!(ext.extension_positions.is_empty());
        assert!(ext.filtered_box_positions.is_empty());
    }
}
