use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trialscope_core::{AppConfig, CanonicalRecord, ExitCode, RctAssessment, SourceKind};
use trialscope_science::dates::SearchWindow;
use trialscope_science::detection::is_rct_publication_type;
use trialscope_science::formats::{OUTPUT_COLUMNS, save_csv, save_json};
use trialscope_science::{JsonFileSource, RunPipeline, SpecialtyClassifier, detect_rct_from_text};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "trialscope",
    about = "Cross-source RCT reconciliation: detect, deduplicate and classify trials",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for AI agents and scripts).
    /// Also enabled by setting TRIALSCOPE_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile candidate exports into one deduplicated, classified list.
    Run {
        /// Source export as NAME=PATH (e.g. pubmed=pubmed.jsonl). Repeatable.
        #[arg(long = "source", action = clap::ArgAction::Append, required = true)]
        sources: Vec<String>,
        /// Write results to a .csv or .json file.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Keep preprints in the results.
        #[arg(long)]
        include_preprints: bool,
        /// Search window length in days.
        #[arg(long)]
        days: Option<u32>,
    },

    /// Run the RCT text detector on a single title/abstract.
    Detect {
        #[arg(long)]
        title: String,
        #[arg(long = "abstract")]
        abstract_text: Option<String>,
        /// Author keyword. Repeatable.
        #[arg(long = "keyword", action = clap::ArgAction::Append)]
        keywords: Vec<String>,
        /// Publication type. Repeatable.
        #[arg(long = "publication-type", action = clap::ArgAction::Append)]
        publication_types: Vec<String>,
    },

    /// Re-classify canonical records from a JSON export.
    Classify {
        #[arg(long)]
        input: PathBuf,
        /// Write results to a .csv or .json file.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List supported source names.
    Sources,

    /// Show version information.
    Version,
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration.
    List,
    /// Print the config file path.
    Path,
    /// Write the default configuration to the config file path.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let json_output = cli.json || std::env::var("TRIALSCOPE_JSON").as_deref() == Ok("1");
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    match cli.command {
        // ── Run ────────────────────────────────────────────────────────────

        Commands::Run {
            sources,
            output,
            include_preprints,
            days,
        } => {
            let mut config = config;
            if include_preprints {
                config.pipeline.include_preprints = true;
            }
            if let Some(days) = days {
                config.pipeline.days = days;
            }

            let mut pipeline = RunPipeline::new(config);
            for spec in &sources {
                match JsonFileSource::from_spec(spec) {
                    Ok(source) => pipeline.add_source(Box::new(source)),
                    Err(e) => fail(json_output, ExitCode::InvalidArgs, "invalid_source", &e.to_string(), start),
                }
            }

            let window = SearchWindow::last_days(pipeline.config().pipeline.days);
            info!(
                "Searching {} to {}",
                window.start.format("%Y-%m-%d"),
                window.end.format("%Y-%m-%d")
            );
            let result = pipeline.run(&window);

            if let Some(path) = &output
                && let Err(e) = write_records(path, &result.records, &pipeline.config().output.delimiter)
            {
                fail(json_output, ExitCode::FileSystemError, "write_failed", &format!("{e:#}"), start);
            }
            let dur = start.elapsed().as_millis();

            if json_output {
                // Records go to the file when one is given.
                let records = match &output {
                    Some(_) => serde_json::Value::Null,
                    None => serde_json::to_value(&result.records)?,
                };
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": {
                        "summary": result.summary,
                        "records": records,
                        "output": output.as_ref().map(|p| p.display().to_string()),
                    },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                print!("{}", result.summary);
                match &output {
                    Some(path) => println!("\nResults saved to: {}", path.display()),
                    None => print_records(&result.records),
                }
            }
        }

        // ── Detect ─────────────────────────────────────────────────────────

        Commands::Detect {
            title,
            abstract_text,
            keywords,
            publication_types,
        } => {
            let assessment =
                assess_text(&title, abstract_text.as_deref(), &keywords, &publication_types);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":assessment,"meta":{"duration_ms":dur}}))?;
            } else {
                let verdict = if assessment.is_rct { "RCT" } else { "not an RCT" };
                println!("{verdict}: {}", assessment.method);
            }
        }

        // ── Classify ───────────────────────────────────────────────────────

        Commands::Classify { input, output } => {
            if !input.exists() {
                fail(
                    json_output,
                    ExitCode::NotFound,
                    "not_found",
                    &format!("Input file not found: {}", input.display()),
                    start,
                );
            }
            let contents = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut records: Vec<CanonicalRecord> = match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => fail(
                    json_output,
                    ExitCode::GeneralError,
                    "invalid_input",
                    &format!("{} is not a canonical record export: {e}", input.display()),
                    start,
                ),
            };

            SpecialtyClassifier::from_config(&config.classification).classify_all(&mut records);

            if let Some(path) = &output
                && let Err(e) = write_records(path, &records, &config.output.delimiter)
            {
                fail(json_output, ExitCode::FileSystemError, "write_failed", &format!("{e:#}"), start);
            }
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":records,"meta":{"duration_ms":dur}}))?;
            } else {
                print_records(&records);
                if let Some(path) = &output {
                    println!("\nResults saved to: {}", path.display());
                }
            }
        }

        // ── Config ─────────────────────────────────────────────────────────

        Commands::Config { action } => {
            let dur = start.elapsed().as_millis();
            match action {
                ConfigAction::List => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":config,"meta":{"duration_ms":dur}}))?;
                    } else {
                        let rendered = toml::to_string_pretty(&config)?;
                        print!("{rendered}");
                    }
                }
                ConfigAction::Path => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":config_path.display().to_string(),"exists":config_path.exists()},"meta":{"duration_ms":dur}}))?;
                    } else {
                        println!("{}", config_path.display());
                    }
                }
                ConfigAction::Init { force } => {
                    if config_path.exists() && !force {
                        fail(
                            json_output,
                            ExitCode::InvalidArgs,
                            "exists",
                            &format!("{} already exists; add --force to overwrite", config_path.display()),
                            start,
                        );
                    }
                    AppConfig::default()
                        .save_to(&config_path)
                        .with_context(|| format!("failed to write {}", config_path.display()))?;
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":{"path":config_path.display().to_string()},"meta":{"duration_ms":dur}}))?;
                    } else {
                        println!("Wrote default config to {}", config_path.display());
                    }
                }
            }
        }

        // ── Sources ────────────────────────────────────────────────────────

        Commands::Sources => {
            let dur = start.elapsed().as_millis();
            if json_output {
                let items: Vec<_> = SourceKind::ALL
                    .iter()
                    .map(|kind| serde_json::json!({
                        "key": kind.key(),
                        "name": kind.name(),
                        "enterprise": kind.is_enterprise(),
                        "enabled": config.pipeline.allows(*kind),
                    }))
                    .collect();
                print_json(&serde_json::json!({"status":"ok","data":items,"meta":{"duration_ms":dur}}))?;
            } else {
                for kind in SourceKind::ALL {
                    let marker = if config.pipeline.allows(kind) { "✓" } else { "○" };
                    let tier = if kind.is_enterprise() { " (enterprise)" } else { "" };
                    println!("{marker} {:<18} {}{tier}", kind.key(), kind.name());
                }
            }
        }

        // ── Version ────────────────────────────────────────────────────────

        Commands::Version => {
            let version = env!("CARGO_PKG_VERSION");
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"version":version,"columns":OUTPUT_COLUMNS.len()},"meta":{"duration_ms":dur}}))?;
            } else {
                println!("trialscope v{version}");
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

fn fail(json_output: bool, code: ExitCode, error: &str, message: &str, start: Instant) -> ! {
    if json_output {
        let envelope = serde_json::json!({
            "status": "error",
            "error": error,
            "message": message,
            "meta": { "duration_ms": start.elapsed().as_millis() }
        });
        println!("{envelope}");
    } else {
        eprintln!("{message}");
    }
    std::process::exit(code as i32);
}

/// Publication types first, then the text signals.
fn assess_text(
    title: &str,
    abstract_text: Option<&str>,
    keywords: &[String],
    publication_types: &[String],
) -> RctAssessment {
    is_rct_publication_type(publication_types)
        .unwrap_or_else(|| detect_rct_from_text(title, abstract_text, keywords))
}

fn write_records(path: &Path, records: &[CanonicalRecord], delimiter: &str) -> Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        save_json(path, records)?;
    } else {
        save_csv(path, records, delimiter)?;
    }
    Ok(())
}

fn print_records(records: &[CanonicalRecord]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    for record in records {
        let year = record
            .metadata
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        println!(
            "{topic:<28}  {year:<4}  {title}",
            topic = record.classification.topic.label(),
            title = record.title(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn publication_type_wins_over_text() {
        let types = vec!["Randomized Controlled Trial".to_string()];
        let assessment = assess_text("Cohort of adults", None, &[], &types);
        assert!(assessment.is_rct);
        assert_eq!(assessment.method, "Publication type: Randomized Controlled Trial");
    }

    #[test]
    fn text_signals_without_publication_types() {
        let assessment = assess_text("A Randomized Controlled Trial of X", None, &[], &[]);
        assert!(assessment.is_rct);
        assert!(assessment.method.starts_with("Strong RCT signal in title"));

        let empty = assess_text("", None, &[], &[]);
        assert!(!empty.is_rct);
    }

    #[test]
    fn write_records_picks_format_by_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("out.json");
        let csv = dir.path().join("out.csv");
        write_records(&json, &[], "; ").unwrap();
        write_records(&csv, &[], "; ").unwrap();

        assert_eq!(std::fs::read_to_string(&json).unwrap().trim(), "[]");
        let header = std::fs::read_to_string(&csv).unwrap();
        assert!(header.starts_with("source_primary,sources_found_in"));
    }

    #[test]
    fn write_records_reports_unwritable_paths() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let result = write_records(&blocker.join("out.csv"), &[], "; ");
        assert!(result.is_err());
    }
}
