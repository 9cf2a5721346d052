mod export;
mod parser;
mod settings;
mod summary;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(name = "ib_qa_parser", about = "Extract interview Q&A records from a PDF text dump")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a text dump and write the records as JSON
    Parse {
        /// Input text file (default: IBQA_INPUT or extracted_full.txt)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output JSON file (default: IBQA_OUTPUT or ib_questions.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep records the acceptance filter would drop
        #[arg(long)]
        keep_all: bool,
    },
    /// Per-category record counts
    Stats {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Table of parsed records
    Preview {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Filter by category (case-insensitive substring)
        #[arg(short, long)]
        category: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Parse every .txt file in a directory into a sibling .json
    Batch {
        dir: PathBuf,
        /// Where to write the .json files (default: same directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load();

    let result = match cli.command {
        Commands::Parse { input, output, keep_all } => {
            let input = input.unwrap_or(settings.input);
            let output = output.unwrap_or(settings.output);
            let count = parse_file(&input, &output, keep_all)?;
            println!("Successfully extracted {} questions to {}", count, output.display());
            Ok(())
        }
        Commands::Stats { input } => run_stats(&input.unwrap_or(settings.input)),
        Commands::Preview { input, category, limit } => {
            run_preview(&input.unwrap_or(settings.input), category.as_deref(), limit)
        }
        Commands::Batch { dir, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| dir.clone());
            run_batch(&dir, &out_dir)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn parse_file(input: &Path, output: &Path, keep_all: bool) -> anyhow::Result<usize> {
    let text = export::read_text(input)?;
    let records = if keep_all {
        parser::parse_unfiltered(&text)
    } else {
        parser::parse_document(&text).records
    };
    export::write_records(output, &records)
        .with_context(|| format!("exporting records parsed from {}", input.display()))?;
    info!(input = %input.display(), output = %output.display(), records = records.len(), "wrote records");
    Ok(records.len())
}

fn run_stats(input: &Path) -> anyhow::Result<()> {
    let text = export::read_text(input)?;
    let outcome = parser::parse_document(&text);
    if outcome.records.is_empty() {
        println!("No questions found in {}.", input.display());
    } else {
        for c in summary::category_counts(&outcome.records) {
            println!("{:>5}  {}", c.count, c.category);
        }
        println!("{}", "-".repeat(40));
        println!(
            "{:>5}  total ({} rejected, {} lines)",
            outcome.records.len(),
            outcome.rejected,
            outcome.line_count
        );
    }
    Ok(())
}

fn run_preview(input: &Path, category: Option<&str>, limit: usize) -> anyhow::Result<()> {
    let text = export::read_text(input)?;
    let outcome = parser::parse_document(&text);
    let rows = summary::select(&outcome.records, category, limit);
    if rows.is_empty() {
        println!("No questions found.");
    } else {
        summary::print_preview(&rows);
        println!("\n{} of {} questions", rows.len(), outcome.records.len());
    }
    Ok(())
}

fn run_batch(dir: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let inputs = list_text_files(dir)?;
    if inputs.is_empty() {
        println!("No .txt files in {}.", dir.display());
    } else {
        println!("Parsing {} files...", inputs.len());
        let total = parse_batch(&inputs, out_dir)?;
        println!(
            "Extracted {} questions from {} files into {}",
            total,
            inputs.len(),
            out_dir.display()
        );
    }
    Ok(())
}

fn list_text_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse_batch(inputs: &[PathBuf], out_dir: &Path) -> anyhow::Result<usize> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut total = 0;
    for input in inputs {
        let stem = input.file_stem().unwrap_or_default();
        pb.set_message(stem.to_string_lossy().into_owned());
        let mut name = stem.to_os_string();
        name.push(".json");
        let output = out_dir.join(name);
        total += parse_file(input, &output, false)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(total)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
