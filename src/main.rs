// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use melodist::config::{self, presets::DEFAULT_GENRE};
use melodist::{Composer, ComposerTuning, Melody, MelodyParams};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("MELODIST - Procedural Melody Generator");
    println!();
    println!("Usage: melodist [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --genre <NAME>       Start from a genre preset (default {})", DEFAULT_GENRE);
    println!("  --params <FILE>      Load parameters and tuning from a YAML file");
    println!("  --seed <N>           Random seed for reproducible output");
    println!("  --duration <SECS>    Override the melody length in seconds");
    println!("  --root <NOTE>        Override the root note (e.g. C, F#, Bb)");
    println!("  --out <FILE>         Write the melody as YAML");
    println!("  --list-genres        List available genre presets");
    println!("  --help               Show this help message");
}

/// Options collected from the command line
#[derive(Debug, Default)]
struct Options {
    help: bool,
    list_genres: bool,
    genre: Option<String>,
    params_file: Option<PathBuf>,
    seed: Option<u64>,
    duration: Option<f64>,
    root: Option<String>,
    out: Option<PathBuf>,
}

fn option_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => {
                options.help = true;
                i += 1;
                continue;
            }
            "--list-genres" => {
                options.list_genres = true;
                i += 1;
                continue;
            }
            "--genre" => options.genre = Some(option_value(args, i, flag)?.to_string()),
            "--params" => options.params_file = Some(PathBuf::from(option_value(args, i, flag)?)),
            "--seed" => {
                let value = option_value(args, i, flag)?;
                options.seed = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("Invalid seed: {}", value))?,
                );
            }
            "--duration" => {
                let value = option_value(args, i, flag)?;
                options.duration = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("Invalid duration: {}", value))?,
                );
            }
            "--root" => options.root = Some(option_value(args, i, flag)?.to_string()),
            "--out" => options.out = Some(PathBuf::from(option_value(args, i, flag)?)),
            _ => return Err(anyhow!("Unknown option: {}", flag)),
        }
        i += 2;
    }

    Ok(options)
}

fn resolve(options: &Options) -> Result<(MelodyParams, ComposerTuning)> {
    let (mut params, tuning) = match (&options.params_file, &options.genre) {
        (Some(path), _) => {
            let file = config::load_melody_file(path)?;
            (file.params, file.tuning)
        }
        (None, Some(genre)) => {
            let params = config::genre_preset(genre)
                .ok_or_else(|| anyhow!("Unknown genre: {} (try --list-genres)", genre))?;
            (params, ComposerTuning::default())
        }
        (None, None) => (
            config::genre_preset(DEFAULT_GENRE).unwrap_or_default(),
            ComposerTuning::default(),
        ),
    };

    if let Some(duration) = options.duration {
        params.duration_seconds = duration;
    }
    if let Some(root) = &options.root {
        params.root_note = root.clone();
    }
    Ok((params, tuning))
}

fn print_summary(melody: &Melody) {
    let summary = melody.summary();
    println!("Scale:      {}", melody.scale());
    println!("Notes:      {}", summary.note_count);
    println!("Motifs:     {}", summary.motif_count);
    println!("Beats:      {:.2}", melody.duration_beats());
    println!("Uniqueness: {:.2}%", summary.uniqueness_score * 100.0);
}

fn run(options: Options) -> Result<()> {
    let (params, tuning) = resolve(&options)?;
    let composer = Composer::new(tuning);
    let melody = composer
        .generate(&params, options.seed)
        .context("Melody generation failed")?;

    print_summary(&melody);

    if let Some(path) = &options.out {
        let yaml = serde_yaml::to_string(&melody).context("Failed to serialize melody")?;
        fs::write(path, yaml).with_context(|| format!("Failed to write melody: {:?}", path))?;
        println!("Saved:      {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
    } else if options.list_genres {
        for genre in config::available_genres() {
            println!("{}", genre);
        }
    } else {
        run(options)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("melodist")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_values() {
        let options =
            parse_options(&args(&["--genre", "lofi", "--seed", "7", "--duration", "12.5"])).unwrap();
        assert_eq!(options.genre.as_deref(), Some("lofi"));
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.duration, Some(12.5));
        assert!(!options.help);
    }

    #[test]
    fn test_help_and_list_anywhere() {
        let options = parse_options(&args(&["--seed", "1", "--help"])).unwrap();
        assert!(options.help);
        assert_eq!(options.seed, Some(1));

        let options = parse_options(&args(&["--root", "D", "--list-genres"])).unwrap();
        assert!(options.list_genres);
        assert_eq!(options.root.as_deref(), Some("D"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_options(&args(&["--bogus"])).is_err());
        assert!(parse_options(&args(&["--seed"])).is_err());
        assert!(parse_options(&args(&["--seed", "x"])).is_err());
    }

    #[test]
    fn test_resolve_overrides() {
        let options =
            parse_options(&args(&["--genre", "ambient", "--root", "F#", "--duration", "5"])).unwrap();
        let (params, _) = resolve(&options).unwrap();
        assert_eq!(params.mode, "dorian");
        assert_eq!(params.root_note, "F#");
        assert_eq!(params.duration_seconds, 5.0);

        let unknown = parse_options(&args(&["--genre", "polka"])).unwrap();
        assert!(resolve(&unknown).is_err());
    }
}
