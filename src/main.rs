use std::env;
use std::fs;
use std::process;

use fretmap::{ArpeggioShape, BoxExtension, Instrument, PentatonicBox, Spelling, Tuning};

fn usage() -> ! {
    eprintln!("Usage: fretmap chord <symbol> [--all] [options]");
    eprintln!("       fretmap box <root> <scale> <index> [--extend <target-scale>] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --instrument <file.yaml>   instrument description (default: standard guitar)");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    // Split flags from positionals
    let mut positionals: Vec<&String> = Vec::new();
    let mut all = false;
    let mut extend: Option<&String> = None;
    let mut instrument_path: Option<&String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => all = true,
            "--extend" => {
                i += 1;
                extend = Some(args.get(i).unwrap_or_else(|| usage()));
            }
            "--instrument" => {
                i += 1;
                instrument_path = Some(args.get(i).unwrap_or_else(|| usage()));
            }
            flag if flag.starts_with("--") => usage(),
            _ => positionals.push(&args[i]),
        }
        i += 1;
    }

    let instrument = match instrument_path {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading instrument file '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match Instrument::from_yaml(&source) {
                Ok(instrument) => instrument,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        None => Instrument::standard_guitar(),
    };
    let tuning = match instrument.tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match positionals.as_slice() {
        [command, symbol] if command.as_str() == "chord" => {
            run_chord(symbol.as_str(), all, &instrument, &tuning);
        }
        [command, root, scale, index] if command.as_str() == "box" => {
            let index: usize = match index.parse() {
                Ok(index) => index,
                Err(_) => usage(),
            };
            run_box(root.as_str(), scale.as_str(), index, extend, &instrument, &tuning);
        }
        _ => usage(),
    }
}

fn run_chord(symbol: &str, all: bool, instrument: &Instrument, tuning: &Tuning) {
    if all {
        let shapes = match fretmap::find_all_arpeggios(symbol, instrument) {
            Ok(shapes) => shapes,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        if shapes.is_empty() {
            println!("No playable shapes for {} on this instrument", symbol);
            return;
        }
        println!("{} shapes for {}:", shapes.len(), symbol);
        for (i, shape) in shapes.iter().enumerate() {
            print_shape(i + 1, shape, tuning);
        }
    } else {
        match fretmap::find_best_arpeggio(symbol, instrument) {
            Ok(Some(shape)) => print_shape(1, &shape, tuning),
            Ok(None) => println!("No playable shape for {} on this instrument", symbol),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

fn run_box(
    root: &str,
    scale: &str,
    index: usize,
    extend: Option<&String>,
    instrument: &Instrument,
    tuning: &Tuning,
) {
    let result = match extend {
        Some(target) => fretmap::find_box_extension(root, scale, target, index, instrument)
            .map(|(boxed, ext)| (boxed, Some(ext))),
        None => fretmap::find_pentatonic_box(root, scale, index, instrument)
            .map(|boxed| (boxed, None)),
    };
    let (boxed, ext) = match result {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if boxed.is_empty() {
        println!("No box {} for {} {} on this instrument", index, root, scale);
        return;
    }
    print_box(&boxed, tuning);
    if let Some(ext) = ext {
        print_extension(&ext, tuning);
    }
}

fn print_shape(number: usize, shape: &ArpeggioShape, tuning: &Tuning) {
    let frets: Vec<String> = shape
        .positions
        .iter()
        .map(|p| format!("{}:{} ({})", p.string + 1, p.fret, tuning.pitch_at(*p)))
        .collect();
    println!(
        "{}. {}, span {} frets: {}",
        number,
        shape.position_label(),
        shape.fret_span,
        frets.join(", ")
    );
}

fn print_box(boxed: &PentatonicBox, tuning: &Tuning) {
    println!("Box {} anchored at fret {}:", boxed.box_index, boxed.anchor_fret);
    for string in (0..tuning.string_count()).rev() {
        let pair: Vec<String> = boxed
            .positions_on_string(string)
            .iter()
            .map(|p| format!("{} ({})", p.fret, tuning.pitch_at(*p)))
            .collect();
        println!(
            "  string {} [{}]: {}",
            string + 1,
            tuning.open_strings()[string].display_name(Spelling::Sharps),
            pair.join(", ")
        );
    }
}

fn print_extension(ext: &BoxExtension, tuning: &Tuning) {
    if !ext.conflict_tones.is_empty() {
        let names: Vec<&str> = ext
            .conflict_tones
            .iter()
            .map(|t| t.display_name(Spelling::Sharps))
            .collect();
        println!("Hidden (not in target scale): {}", names.join(", "));
    }
    if ext.extension_tones.is_empty() {
        println!("No extension tones: the box already matches the target scale");
        return;
    }
    let names: Vec<&str> = ext
        .extension_tones
        .iter()
        .map(|t| t.display_name(Spelling::Sharps))
        .collect();
    println!("Extension tones: {}", names.join(", "));
    for &pos in &ext.extension_positions {
        println!(
            "  string {} fret {} ({})",
            pos.string + 1,
            pos.fret,
            tuning.pitch_at(pos)
        );
    }
}
