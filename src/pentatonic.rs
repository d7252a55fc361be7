//! # Pentatonic Box Locator
//!
//! Anchors a two-notes-per-string "box" pattern for a 5-tone scale at a
//! chosen scale-degree occurrence on the lowest string, then picks the best
//! adjacent fret pair per string near the anchor.
//!
//! The window constants are empirically tuned for standard 6-string guitar
//! geometry and kept as named constants rather than load-bearing invariants;
//! exotic tunings may produce incomplete boxes, which is tolerated per
//! string rather than fatal.

use serde::Serialize;

use crate::fretboard::{FretPosition, Tuning};
use crate::theory::ToneSet;

/// Box anchoring always scans the full practical range, independent of the
/// caller's display `max_fret`.
pub const BOX_SCAN_MAX_FRET: u8 = 22;

/// Strict per-string window: first fret of the pair >= anchor - 1.
const STRICT_WINDOW_BELOW: i16 = 1;
/// Strict per-string window: second fret of the pair <= anchor + 4.
const STRICT_WINDOW_ABOVE: i16 = 4;
/// Relaxed fallback targets the pair midpoint at anchor + 1.5; doubled here
/// so the distance comparison stays in integers.
const FALLBACK_MIDPOINT_DOUBLED: i16 = 3;
/// Relaxed fallback still refuses pairs wider than a playable span.
const FALLBACK_MAX_PAIR_SPAN: u8 = 5;

/// A 5-note scale's fingering pattern: in the normal case, exactly one
/// adjacent pair of scale-tone frets per string. Order is not meaningful,
/// only set membership and per-string pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PentatonicBox {
    pub positions: Vec<FretPosition>,
    pub box_index: usize,
    pub anchor_fret: u8,
}

impl PentatonicBox {
    /// The failure signal for infeasible requests: no positions.
    pub fn empty(box_index: usize) -> Self {
        PentatonicBox {
            positions: Vec::new(),
            box_index,
            anchor_fret: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn min_fret(&self) -> Option<u8> {
        self.positions.iter().map(|p| p.fret).min()
    }

    pub fn max_fret(&self) -> Option<u8> {
        self.positions.iter().map(|p| p.fret).max()
    }

    /// Positions on one string, in ascending fret order.
    pub fn positions_on_string(&self, string: usize) -> Vec<FretPosition> {
        let mut on_string: Vec<FretPosition> = self
            .positions
            .iter()
            .filter(|p| p.string == string)
            .copied()
            .collect();
        on_string.sort();
        on_string
    }
}

/// Locate the box at `box_index` (0–4) for a 5-tone scale.
///
/// The anchor is the scale-tone occurrence on the lowest string at
/// `box_index` places past the first root occurrence, folded down an octave
/// when it lands above fret 12. Infeasible requests — an empty tone set, no
/// root on the lowest string, a box index past the scanned occurrences —
/// return an empty box, not an error.
pub fn pentatonic_box(tone_set: &ToneSet, tuning: &Tuning, box_index: usize) -> PentatonicBox {
    let root = match tone_set.root() {
        Some(root) => root,
        None => return PentatonicBox::empty(box_index),
    };

    let low_string_frets = tuning.scan_string(0, 0, BOX_SCAN_MAX_FRET, tone_set.tones());
    let root_occurrence = low_string_frets
        .iter()
        .position(|&fret| tuning.pitch_at(FretPosition::new(0, fret)) == root);
    let anchor_index = match root_occurrence {
        Some(idx) => idx + box_index,
        None => return PentatonicBox::empty(box_index),
    };
    let mut anchor = match low_string_frets.get(anchor_index) {
        Some(&fret) => fret,
        None => return PentatonicBox::empty(box_index),
    };
    // Fold high anchors to the lower, more commonly played octave;
    // pitch-class equality is octave-invariant so matching is unaffected.
    if anchor > 12 {
        anchor -= 12;
    }

    let mut positions = Vec::with_capacity(tuning.string_count() * 2);
    for string in 0..tuning.string_count() {
        let frets = tuning.scan_string(string, 0, BOX_SCAN_MAX_FRET, tone_set.tones());
        if let Some((first, second)) = select_pair(&frets, anchor) {
            positions.push(FretPosition::new(string, first));
            positions.push(FretPosition::new(string, second));
        }
        // A string with no qualifying pair contributes nothing; the box is
        // allowed to be incomplete on extreme tunings.
    }

    PentatonicBox {
        positions,
        box_index,
        anchor_fret: anchor,
    }
}

/// Pick the adjacent scale-tone fret pair for one string.
///
/// Strict window first: first fret >= anchor - 1 and second <= anchor + 4,
/// minimizing the first fret's distance from the anchor. Fallback: any
/// adjacent pair spanning <= 5 frets, minimizing the pair midpoint's
/// distance from anchor + 1.5. Ties go to the lower pair in both passes.
fn select_pair(frets: &[u8], anchor: u8) -> Option<(u8, u8)> {
    let anchor = anchor as i16;

    let strict = frets
        .windows(2)
        .filter(|pair| {
            pair[0] as i16 >= anchor - STRICT_WINDOW_BELOW
                && pair[1] as i16 <= anchor + STRICT_WINDOW_ABOVE
        })
        .min_by_key(|pair| (pair[0] as i16 - anchor).abs());
    if let Some(pair) = strict {
        return Some((pair[0], pair[1]));
    }

    frets
        .windows(2)
        .filter(|pair| pair[1] - pair[0] <= FALLBACK_MAX_PAIR_SPAN)
        .min_by_key(|pair| {
            // Compare doubled midpoints to stay in integer arithmetic.
            let doubled_midpoint = pair[0] as i16 + pair[1] as i16;
            (doubled_midpoint - (2 * anchor + FALLBACK_MIDPOINT_DOUBLED)).abs()
        })
        .map(|pair| (pair[0], pair[1]))
}
