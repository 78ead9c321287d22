//! Batch command - extract résumés from many files concurrently.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use vitae_core::document::DocumentLoader;
use vitae_core::extract::{ExtractionResult, HeuristicExtractor, ResumeParser};

use super::extract::format_record;
use super::{load_config, KindArg, OutputFormat};

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "text", "pdf"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Source kind for every file, overriding extensions
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionResult, String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_paths = match &args.output_dir {
        Some(output_dir) => {
            fs::create_dir_all(output_dir)?;
            plan_outputs(&files, output_dir, args.format.extension())?
        }
        None => HashMap::new(),
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let loader = Arc::new(DocumentLoader::from_config(&config.input));
    let extractor = Arc::new(HeuristicExtractor::from_config(&config));
    let min_length = config.input.min_text_length;
    let kind = args.kind.map(Into::into);
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut join_set = JoinSet::new();
    for path in files {
        let loader = Arc::clone(&loader);
        let extractor = Arc::clone(&extractor);
        let semaphore = Arc::clone(&semaphore);

        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let file_start = Instant::now();
            let task_path = path.clone();

            // Extraction is CPU-bound
            let outcome = tokio::task::spawn_blocking(move || -> Result<ExtractionResult, String> {
                let document = loader.load_path(&task_path, kind).map_err(|e| e.to_string())?;
                document.ensure_readable(min_length).map_err(|e| e.to_string())?;
                Ok(extractor.parse(&document))
            })
            .await
            .unwrap_or_else(|e| Err(format!("worker failed: {}", e)));

            FileResult {
                path,
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            }
        });
    }

    let mut results = Vec::with_capacity(join_set.len());
    while let Some(joined) = join_set.join_next().await {
        let result = joined?;
        if let Err(e) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), e);
            } else {
                error!("Failed to process {}: {}", result.path.display(), e);
                pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), e);
            }
        }
        results.push(result);
        pb.inc(1);
    }
    pb.finish_and_clear();
    results.sort_by(|a, b| a.path.cmp(&b.path));

    if !output_paths.is_empty() {
        for result in &results {
            if let (Ok(extraction), Some(output_path)) =
                (&result.outcome, output_paths.get(&result.path))
            {
                fs::write(output_path, format_record(&extraction.record, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.outcome.is_err()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(e) = &result.outcome {
                println!("  - {}: {}", result.path.display(), e);
            }
        }
    }

    Ok(())
}

/// Choose an output file for every input.
///
/// Names keep the source extension (`cv.txt` becomes `cv.txt.json`), so a
/// `.txt` and a `.pdf` with the same stem stay apart. Inputs from different
/// directories sharing a name get a numeric suffix. An output that would land
/// on one of the inputs is refused.
fn plan_outputs(
    files: &[PathBuf],
    output_dir: &Path,
    extension: &str,
) -> anyhow::Result<HashMap<PathBuf, PathBuf>> {
    let inputs: HashSet<PathBuf> = files.iter().filter_map(|p| fs::canonicalize(p).ok()).collect();
    let output_dir = fs::canonicalize(output_dir)?;
    let mut used = HashSet::new();
    let mut planned = HashMap::with_capacity(files.len());

    for path in files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("resume");

        let mut candidate = format!("{}.{}", name, extension);
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{}-{}.{}", name, n, extension);
            n += 1;
        }

        let output_path = output_dir.join(&candidate);
        if inputs.contains(&output_path) {
            anyhow::bail!(
                "Refusing to overwrite input file {} with the output for {}",
                output_path.display(),
                path.display()
            );
        }

        used.insert(candidate);
        planned.insert(path.clone(), output_path);
    }

    Ok(planned)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = chrono::Local::now().to_rfc3339();

    wtr.write_record([
        "filename",
        "status",
        "full_name",
        "email",
        "phone",
        "experience",
        "education",
        "skills",
        "warnings",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.outcome {
            Ok(extraction) => {
                let record = &extraction.record;
                wtr.write_record([
                    filename,
                    "success",
                    record.personal.full_name.as_str(),
                    record.personal.email.as_str(),
                    record.personal.phone.as_str(),
                    record.experience.len().to_string().as_str(),
                    record.education.len().to_string().as_str(),
                    record.skills.len().to_string().as_str(),
                    extraction.warnings.len().to_string().as_str(),
                    result.processing_time_ms.to_string().as_str(),
                    processed_at.as_str(),
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    result.processing_time_ms.to_string().as_str(),
                    processed_at.as_str(),
                    e.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
