//! Build a display sheet from a roster and a stat source.
//!
//! Usage:
//!   statsheet --sport soccer --roster roster.json --pdf stats.pdf
//!   statsheet --sport baseball --family fused --roster roster.json \
//!       --pdf this_season.pdf --pdf last_season.pdf --output sheet.json
//!   statsheet --sport volleyball --api api.json
//!
//! Set RUST_LOG=debug for parser diagnostics.

use statsheet::config::{Calibration, DocumentFamily, ExtractionProfile};
use statsheet::error::{Error, Result};
use statsheet::pipeline::{self, StatSource};
use statsheet::records::{RosterPlayer, Sport};
use statsheet::source::{fetch_first_valid, looks_like_pdf, FileFetcher};
use std::path::PathBuf;
use std::process;

struct CliConfig {
    sport: Sport,
    roster: Option<PathBuf>,
    pdfs: Vec<String>,
    api: Option<PathBuf>,
    family: DocumentFamily,
    calibration: Option<PathBuf>,
    columns: Option<usize>,
    output: Option<PathBuf>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: statsheet --sport <sport> [--roster <json>] (--pdf <path>... | --api <json>)\n\
         \x20      [--family columnar|fused] [--calibration <json>] [--columns N] [--output <path>]"
    );
    process::exit(2);
}

fn value(args: &[String], i: &mut usize) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => usage(),
    }
}

impl CliConfig {
    fn from_args() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut sport = None;
        let mut config = CliConfig {
            sport: Sport::Baseball,
            roster: None,
            pdfs: Vec::new(),
            api: None,
            family: DocumentFamily::default(),
            calibration: None,
            columns: None,
            output: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--sport" => sport = Some(value(&args, &mut i).parse::<Sport>()?),
                "--roster" => config.roster = Some(PathBuf::from(value(&args, &mut i))),
                "--pdf" => config.pdfs.push(value(&args, &mut i)),
                "--api" => config.api = Some(PathBuf::from(value(&args, &mut i))),
                "--family" => config.family = value(&args, &mut i).parse::<DocumentFamily>()?,
                "--calibration" => config.calibration = Some(PathBuf::from(value(&args, &mut i))),
                "--columns" => {
                    let raw = value(&args, &mut i);
                    let n = raw
                        .parse()
                        .map_err(|_| Error::InvalidConfig(format!("--columns expects a number, got '{}'", raw)))?;
                    config.columns = Some(n);
                },
                "--output" | "-o" => config.output = Some(PathBuf::from(value(&args, &mut i))),
                "--help" | "-h" => usage(),
                other => {
                    eprintln!("Unknown argument: {}", other);
                    usage();
                },
            }
            i += 1;
        }

        config.sport = sport.unwrap_or_else(|| usage());
        if config.pdfs.is_empty() == config.api.is_none() {
            eprintln!("Give either --pdf or --api");
            usage();
        }
        Ok(config)
    }

    fn profile(&self) -> Result<ExtractionProfile> {
        let mut profile = ExtractionProfile::new(self.sport).with_family(self.family);
        if let Some(path) = &self.calibration {
            profile = profile.with_calibration(Calibration::from_file(path)?);
        }
        if let Some(columns) = self.columns {
            profile = profile.with_columns(columns);
        }
        Ok(profile)
    }
}

fn load_roster(path: Option<&PathBuf>) -> Result<Vec<RosterPlayer>> {
    match path {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(Vec::new()),
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let profile = config.profile()?;
    let roster = load_roster(config.roster.as_ref())?;

    let sheet = match &config.api {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            pipeline::build(&roster, StatSource::Api(&json), &profile)?
        },
        None => {
            let fetcher = FileFetcher::new();
            let (location, bytes) = fetch_first_valid(&fetcher, &config.pdfs, looks_like_pdf)?;
            log::info!("reading {}", location);
            pipeline::build(&roster, StatSource::Pdf(&bytes), &profile)?
        },
    };

    for warning in &sheet.warnings {
        eprintln!("warning: {}", warning);
    }

    let json = serde_json::to_string_pretty(&sheet)?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!(
                "Wrote {} athletes ({} inactive) to {}",
                sheet.athletes().count(),
                sheet.inactive.len(),
                path.display()
            );
        },
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let result = CliConfig::from_args().and_then(|config| run(&config));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
