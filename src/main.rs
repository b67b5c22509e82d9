use anyhow::Result;
use clap::Parser;
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

use matterprops::{
    io::resolve_files, FrontMatterReader, Properties, ReaderConfig, Value, YamlErrorMode,
};

mod args;

use args::{Commands, ExtractOpts};

#[derive(Parser)]
#[command(name = "matterprops", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Props(args) => {
            let name_regex = args.name_regex.as_deref().map(Regex::new).transpose()?;
            let reader = reader_for(&args.opts);
            let files = files_or_warn(&args.files);

            let mut results: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();
            for file in &files {
                debug!("Processing file: {}", file.display());
                let document = reader.read_file(file)?;
                let Some(properties) = document.properties else {
                    continue;
                };

                let selected: BTreeMap<String, Value> = properties
                    .map(&|property| {
                        let keep = name_regex
                            .as_ref()
                            .map_or(true, |re| re.is_match(property.name().as_str()));
                        keep.then(|| property.any_value())
                    })
                    .into_iter()
                    .collect();
                if !selected.is_empty() {
                    results.insert(file.to_string_lossy().to_string(), selected);
                }
            }

            if results.is_empty() {
                return Ok(());
            }
            if files.len() == 1 {
                if let Some(only) = results.values().next() {
                    print_value(only, args.json)?;
                }
            } else {
                print_value(&results, args.json)?;
            }
        }
        Commands::Body(args) => {
            let reader = reader_for(&args.opts);
            for file in files_or_warn(&args.files) {
                let document = reader.read_file(&file)?;
                println!("{}", document.body_text());
            }
        }
        Commands::Validate(args) => {
            let reader = reader_for(&args.opts);
            for file in files_or_warn(&args.files) {
                match reader.read_file(&file) {
                    Ok(document) => println!(
                        "{}: OK ({} properties)",
                        file.display(),
                        document.count
                    ),
                    Err(e) => println!("{}: Invalid ({})", file.display(), e),
                }
            }
        }
    }
    Ok(())
}

fn reader_for(opts: &ExtractOpts) -> FrontMatterReader {
    FrontMatterReader::with_config(ReaderConfig {
        smart_parse: opts.smart,
        yaml_errors: if opts.lenient {
            YamlErrorMode::Lenient
        } else {
            YamlErrorMode::Strict
        },
        ..Default::default()
    })
}

fn files_or_warn(paths: &[PathBuf]) -> Vec<PathBuf> {
    let files = resolve_files(paths);
    if files.is_empty() {
        warn!("No files found to process");
    }
    files
}

fn print_value<T: serde::Serialize>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_yaml::to_string(value)?.trim_end());
    }
    Ok(())
}
