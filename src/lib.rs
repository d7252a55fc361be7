pub mod arpeggio;
pub mod error;
pub mod extension;
pub mod fretboard;
pub mod pentatonic;
pub mod pitch;
pub mod theory;

pub use arpeggio::{all_arpeggio_shapes, best_arpeggio_path, position_label, ArpeggioShape, MAX_FRET_SPAN};
pub use error::FretError;
pub use extension::{resolve_extension, BoxExtension};
pub use fretboard::{scan_for_tone_set, FretPosition, Instrument, Tuning};
pub use pentatonic::{pentatonic_box, PentatonicBox, BOX_SCAN_MAX_FRET};
pub use pitch::{PitchClass, Spelling};
pub use theory::{Scale, ToneSet};

/// Find the single smallest-span arpeggio path for a chord symbol on an
/// instrument. This is the main entry point for chord queries.
///
/// `Ok(None)` means the request is geometrically infeasible (e.g. more chord
/// tones than strings); `Err` is reserved for malformed input.
pub fn find_best_arpeggio(
    chord_symbol: &str,
    instrument: &Instrument,
) -> Result<Option<ArpeggioShape>, FretError> {
    let tones = ToneSet::from_chord_symbol(chord_symbol)?;
    let tuning = instrument.tuning()?;
    Ok(best_arpeggio_path(&tones, &tuning, instrument.frets))
}

/// Enumerate every playable arpeggio shape for a chord symbol, in neck order.
pub fn find_all_arpeggios(
    chord_symbol: &str,
    instrument: &Instrument,
) -> Result<Vec<ArpeggioShape>, FretError> {
    let tones = ToneSet::from_chord_symbol(chord_symbol)?;
    let tuning = instrument.tuning()?;
    Ok(all_arpeggio_shapes(&tones, &tuning, instrument.frets))
}

/// Locate a pentatonic box by index for a named scale rooted at `root`.
///
/// An empty box signals an infeasible request (box index past the available
/// occurrences); malformed root or scale names are errors.
pub fn find_pentatonic_box(
    root: &str,
    scale_name: &str,
    box_index: usize,
    instrument: &Instrument,
) -> Result<PentatonicBox, FretError> {
    let root = PitchClass::parse(root)?;
    let tones = Scale::parse(scale_name)?.tone_set(root);
    let tuning = instrument.tuning()?;
    Ok(pentatonic_box(&tones, &tuning, box_index))
}

/// Locate a pentatonic box and resolve the extension that relates it to a
/// target scale over the same root.
pub fn find_box_extension(
    root: &str,
    pentatonic_name: &str,
    target_name: &str,
    box_index: usize,
    instrument: &Instrument,
) -> Result<(PentatonicBox, BoxExtension), FretError> {
    let root = PitchClass::parse(root)?;
    let pentatonic = Scale::parse(pentatonic_name)?.tone_set(root);
    let target = Scale::parse(target_name)?.tone_set(root);
    let tuning = instrument.tuning()?;
    let boxed = pentatonic_box(&pentatonic, &tuning, box_index);
    let ext = resolve_extension(&boxed, &pentatonic, &target, &tuning);
    Ok((boxed, ext))
}
