//! # Arpeggio Shape Search
//!
//! Places one fretboard position per chord tone across consecutive strings,
//! under a fret-span playability constraint. Two searches share the same
//! geometry substrate:
//!
//! - [`best_arpeggio_path`] greedily builds one path per starting string and
//!   keeps the globally smallest-span result.
//! - [`all_arpeggio_shapes`] enumerates every playable combination by
//!   depth-first descent, pruning on span during recursion.
//!
//! Both treat infeasible requests (empty tone set, more tones than strings,
//! a tone with no position on its required string) as empty results, never
//! as errors.

use std::collections::HashSet;

use serde::Serialize;

use crate::fretboard::{scan_for_tone_set, FretPosition, Tuning};
use crate::theory::ToneSet;

/// The sole playability filter: no enumerated shape spans more than this
/// many frets.
pub const MAX_FRET_SPAN: u8 = 5;

/// Named neck regions for presentational bucketing, first match wins.
/// Callers depend on these exact boundaries for stable grouping.
const POSITION_REGIONS: &[(&str, u8, u8)] = &[
    ("Open position", 0, 2),
    ("5th position", 3, 7),
    ("9th position", 8, 11),
    ("12th position", 12, 15),
    ("Upper frets", 16, 24),
];

/// One fret position per chord tone across consecutive strings.
///
/// `positions[i]` sits on string `starting_string + i` and sounds tone `i`
/// of the tone set the shape was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArpeggioShape {
    pub positions: Vec<FretPosition>,
    pub starting_string: usize,
    pub min_fret: u8,
    pub max_fret: u8,
    pub fret_span: u8,
}

impl ArpeggioShape {
    fn from_positions(positions: Vec<FretPosition>, starting_string: usize) -> Self {
        let min_fret = positions.iter().map(|p| p.fret).min().unwrap_or(0);
        let max_fret = positions.iter().map(|p| p.fret).max().unwrap_or(0);
        ArpeggioShape {
            positions,
            starting_string,
            min_fret,
            max_fret,
            fret_span: max_fret - min_fret,
        }
    }

    /// The named neck region containing `min_fret`, falling back to a
    /// literal fret label outside every declared region.
    pub fn position_label(&self) -> String {
        position_label(self.min_fret)
    }
}

/// Bucket a fret into its named neck region.
pub fn position_label(min_fret: u8) -> String {
    for &(label, lo, hi) in POSITION_REGIONS {
        if (lo..=hi).contains(&min_fret) {
            return label.to_string();
        }
    }
    format!("fret {}", min_fret)
}

/// Candidate positions for each tone, restricted to the one string that tone
/// must occupy for the given starting string. `None` when some tone has no
/// candidate on its required string.
fn string_restricted_candidates(
    scan: &[Vec<FretPosition>],
    starting_string: usize,
) -> Option<Vec<Vec<FretPosition>>> {
    let mut candidates = Vec::with_capacity(scan.len());
    for (tone_idx, positions) in scan.iter().enumerate() {
        let required_string = starting_string + tone_idx;
        let on_string: Vec<FretPosition> = positions
            .iter()
            .filter(|p| p.string == required_string)
            .copied()
            .collect();
        if on_string.is_empty() {
            return None;
        }
        candidates.push(on_string);
    }
    Some(candidates)
}

/// The single smallest-span arpeggio path across all starting strings.
///
/// For each starting string and each candidate position of the first tone,
/// every subsequent tone greedily takes the candidate on its required string
/// whose fret is nearest the first tone's fret (ties to scan order). The
/// globally smallest span wins; ties go to the first path found.
///
/// Returns `None` when no starting string hosts every tone — including the
/// empty tone set and instruments with fewer strings than tones.
pub fn best_arpeggio_path(
    tone_set: &ToneSet,
    tuning: &Tuning,
    max_fret: u8,
) -> Option<ArpeggioShape> {
    if tone_set.is_empty() || tone_set.len() > tuning.string_count() {
        return None;
    }
    let scan = scan_for_tone_set(tone_set, tuning, max_fret);

    let mut best: Option<ArpeggioShape> = None;
    for starting_string in 0..=(tuning.string_count() - tone_set.len()) {
        let candidates = match string_restricted_candidates(&scan, starting_string) {
            Some(c) => c,
            None => continue,
        };

        for &first in &candidates[0] {
            let mut path = vec![first];
            for tone_candidates in &candidates[1..] {
                // Nearest fret to the first tone's fret, ties to scan order
                let mut nearest = tone_candidates[0];
                for &candidate in &tone_candidates[1..] {
                    let current = (nearest.fret as i16 - first.fret as i16).abs();
                    let challenger = (candidate.fret as i16 - first.fret as i16).abs();
                    if challenger < current {
                        nearest = candidate;
                    }
                }
                path.push(nearest);
            }
            let shape = ArpeggioShape::from_positions(path, starting_string);
            let improves = match &best {
                Some(current) => shape.fret_span < current.fret_span,
                None => true,
            };
            if improves {
                best = Some(shape);
            }
        }
    }
    best
}

/// Every playable arpeggio shape, deduplicated and sorted in neck order
/// (ascending `min_fret`, then `starting_string`).
///
/// Depth-first enumeration over a fixed-depth candidate tree, one level per
/// tone. The span prune runs during recursion — a candidate further than
/// [`MAX_FRET_SPAN`] from the first chosen fret is never descended into —
/// and again at the leaf on the completed path's span, keeping branching
/// small regardless of fret range.
pub fn all_arpeggio_shapes(tone_set: &ToneSet, tuning: &Tuning, max_fret: u8) -> Vec<ArpeggioShape> {
    if tone_set.is_empty() || tone_set.len() > tuning.string_count() {
        return Vec::new();
    }
    let scan = scan_for_tone_set(tone_set, tuning, max_fret);

    let mut seen: HashSet<Vec<FretPosition>> = HashSet::new();
    let mut shapes = Vec::new();

    for starting_string in 0..=(tuning.string_count() - tone_set.len()) {
        let candidates = match string_restricted_candidates(&scan, starting_string) {
            Some(c) => c,
            None => continue,
        };

        for &first in &candidates[0] {
            let mut path = vec![first];
            descend(&candidates, &mut path, first.fret, &mut |path| {
                let shape = ArpeggioShape::from_positions(path.to_vec(), starting_string);
                if shape.fret_span <= MAX_FRET_SPAN && seen.insert(path.to_vec()) {
                    shapes.push(shape);
                }
            });
        }
    }

    shapes.sort_by_key(|s| (s.min_fret, s.starting_string));
    shapes
}

/// Recursive descent over per-tone candidates, pruning against the first
/// chosen fret at every step.
fn descend(
    candidates: &[Vec<FretPosition>],
    path: &mut Vec<FretPosition>,
    first_fret: u8,
    on_complete: &mut impl FnMut(&[FretPosition]),
) {
    if path.len() == candidates.len() {
        on_complete(path);
        return;
    }
    let depth = path.len();
    for &candidate in &candidates[depth] {
        if (candidate.fret as i16 - first_fret as i16).abs() > MAX_FRET_SPAN as i16 {
            continue;
        }
        path.push(candidate);
        descend(candidates, path, first_fret, on_complete);
        path.pop();
    }
}
