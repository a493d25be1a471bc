//! Time ALTO extraction
//!
//! Parses each given ALTO document and reports how long extraction took.
//! A diagnostic smoke test, not part of the library API.
//!
//! Usage:
//!   cargo run --release --bin alto_timing -- batch/0001/ocr.xml batch/0002/ocr.xml
//!   cargo run --release --bin alto_timing -- --json --strict https://example.org/ocr.xml

use alto_oxide::{AltoExtractor, Extraction, ParserOptions};
use std::time::Instant;

struct TimingConfig {
    references: Vec<String>,
    json: bool,
    strict: bool,
}

impl TimingConfig {
    fn from_args() -> Self {
        let mut references = Vec::new();
        let mut json = false;
        let mut strict = false;

        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--json" => json = true,
                "--strict" => strict = true,
                "--help" | "-h" => {
                    println!("Usage: alto_timing [--json] [--strict] <path-or-url>...");
                    std::process::exit(0);
                },
                _ => references.push(arg),
            }
        }

        Self {
            references,
            json,
            strict,
        }
    }
}

fn print_json(extraction: &Extraction) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&extraction.text)?);
    println!("{}", serde_json::to_string_pretty(&extraction.coords)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let config = TimingConfig::from_args();
    if config.references.is_empty() {
        eprintln!("Usage: alto_timing [--json] [--strict] <path-or-url>...");
        std::process::exit(2);
    }

    let options = if config.strict {
        ParserOptions::strict()
    } else {
        ParserOptions::lenient()
    };
    let extractor = AltoExtractor::new(options);

    let mut failed = 0;
    for reference in &config.references {
        let start_time = Instant::now();
        match extractor.extract(reference) {
            Ok(extraction) => {
                let elapsed = start_time.elapsed();
                println!("Parsed {} in {:.4} seconds", reference, elapsed.as_secs_f64());
                if config.json {
                    if let Err(e) = print_json(&extraction) {
                        eprintln!("Failed to serialize {}: {}", reference, e);
                        failed += 1;
                    }
                }
            },
            Err(e) => {
                eprintln!("Failed to parse {}: {}", reference, e);
                failed += 1;
            },
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
