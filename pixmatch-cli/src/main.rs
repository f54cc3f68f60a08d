use clap::Parser;
use pixmatch::io::load_bitmap;
use pixmatch::{Candidate, MatchConfig, MatchResult, Matcher, RankOrder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Pixmatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for match diagnostics.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    rank_order: RankOrder,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            rank_order: cfg.rank_order,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    query_path: String,
    candidates_dir: String,
    output_path: Option<String>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query_path: String::new(),
            candidates_dir: String::new(),
            output_path: None,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    matches: Vec<MatchResult>,
    total_matches: usize,
}

/// Reads every regular file in `dir` (sorted by path for reproducible
/// output) as an encoded candidate image.
fn collect_candidates(dir: &Path) -> Result<Vec<Candidate>, Box<dyn std::error::Error>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = path.to_string_lossy().into_owned();
        let link = id.clone();
        candidates.push(Candidate::encoded(id, name, bytes, link));
    }
    Ok(candidates)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("pixmatch=info".parse()?)
                    .add_directive("pixmatch_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.query_path.is_empty() || config.candidates_dir.is_empty() {
        return Err("query_path and candidates_dir must be set in the config".into());
    }

    let query = load_bitmap(&config.query_path)?;
    let candidates = collect_candidates(Path::new(&config.candidates_dir))?;
    tracing::info!(
        query = config.query_path.as_str(),
        candidates = candidates.len(),
        "inputs loaded"
    );

    let matcher = Matcher::new().with_config(MatchConfig {
        rank_order: config.match_cfg.rank_order,
        parallel: config.match_cfg.parallel,
    });

    let matches = matcher.rank(&query, &candidates);
    let output = Output {
        total_matches: matches.len(),
        matches,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
