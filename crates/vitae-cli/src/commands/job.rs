//! Job command - extract a job posting from a file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use vitae_core::document::DocumentLoader;
use vitae_core::extract::JobExtractor;
use vitae_core::models::job::JobRecord;

use super::{load_config, KindArg, OutputFormat};

/// Arguments for the job command.
#[derive(Args)]
pub struct JobArgs {
    /// Job posting file (.txt, .md or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Source kind, overriding the file extension
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,
}

pub async fn run(args: JobArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing job posting: {}", args.input.display());

    let document = DocumentLoader::from_config(&config.input)
        .load_path(&args.input, args.kind.map(Into::into))?;
    let job = JobExtractor::from_config(&config).extract(document.text(), &document.hints());

    if job.is_empty() {
        eprintln!(
            "{} Nothing recognizable was found in {}",
            style("⚠").yellow(),
            args.input.display()
        );
    }

    let output = format_job(&job, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_job(job: &JobRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(job)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record([
                "title",
                "company",
                "location",
                "email",
                "employment_type",
                "requirements",
                "responsibilities",
                "skills",
            ])?;
            wtr.write_record([
                &job.title,
                &job.company,
                &job.location,
                &job.email,
                &job.employment_type,
                &job.requirements.join("; "),
                &job.responsibilities.join("; "),
                &job.skills.join("; "),
            ])?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(job)),
    }
}

fn format_text(job: &JobRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Title: {}\n", job.title));
    output.push_str(&format!("Company: {}\n", job.company));
    output.push_str(&format!("Location: {}\n", job.location));
    if !job.employment_type.is_empty() {
        output.push_str(&format!("Type: {}\n", job.employment_type));
    }
    if !job.email.is_empty() {
        output.push_str(&format!("Contact: {}\n", job.email));
    }

    for (heading, items) in [
        ("Responsibilities", &job.responsibilities),
        ("Requirements", &job.requirements),
    ] {
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("\n{}:\n", heading));
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
    }

    if !job.skills.is_empty() {
        output.push_str(&format!("\nSkills: {}\n", job.skills.join(", ")));
    }

    output
}
