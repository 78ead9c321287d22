//! Extract command - extract a résumé from a single file.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use vitae_core::document::DocumentLoader;
use vitae_core::extract::{HeuristicExtractor, ResumeParser};
use vitae_core::models::record::{ExtractionRecord, Provenance};

use super::{load_config, KindArg, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (.txt, .md or .pdf)
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

    /// Minimum readable characters (default from config)
    #[arg(long)]
    min_length: Option<usize>,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Loading document...");

    let document = DocumentLoader::from_config(&config.input)
        .load_path(&args.input, args.kind.map(Into::into))?;

    let min_length = args.min_length.unwrap_or(config.input.min_text_length);
    if let Err(e) = document.ensure_readable(min_length) {
        pb.finish_and_clear();
        anyhow::bail!("{}: {}", args.input.display(), e);
    }

    pb.set_message("Extracting résumé...");
    let result = HeuristicExtractor::from_config(&config).parse(&document);
    pb.finish_and_clear();

    let output = format_record(&result.record, args.format)?;

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

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &ExtractionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "full_name",
        "email",
        "phone",
        "location",
        "summary",
        "experience",
        "education",
        "skills",
        "languages",
        "synthesized",
    ])?;

    let languages: Vec<&str> = record.languages.iter().map(|l| l.language.as_str()).collect();
    wtr.write_record([
        &record.personal.full_name,
        &record.personal.email,
        &record.personal.phone,
        &record.personal.location,
        &record.personal.summary,
        &record.experience.len().to_string(),
        &record.education.len().to_string(),
        &record.skills.join("; "),
        &languages.join("; "),
        &record.has_synthesized_content().to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();
    let personal = &record.personal;

    // Writing to a String cannot fail
    let _ = writeln!(output, "Name: {}", personal.full_name);
    let _ = writeln!(output, "Email: {}", personal.email);
    let _ = writeln!(output, "Phone: {}", personal.phone);
    let _ = writeln!(output, "Location: {}", personal.location);

    if !personal.summary.is_empty() {
        let marker = if personal.summary_provenance == Provenance::Synthesized {
            " (generated)"
        } else {
            ""
        };
        let _ = writeln!(output, "\nSummary{}:\n  {}", marker, personal.summary);
    }

    if !record.experience.is_empty() {
        output.push_str("\nExperience:\n");
        for job in &record.experience {
            let _ = writeln!(
                output,
                "  {} - {} ({} - {})",
                job.position, job.company, job.start_year, job.end_year
            );
            for line in job.description.lines() {
                let _ = writeln!(output, "    • {}", line);
            }
        }
    }

    if !record.education.is_empty() {
        output.push_str("\nEducation:\n");
        for school in &record.education {
            let _ = writeln!(
                output,
                "  {} - {} ({} - {})",
                school.degree, school.school, school.start_year, school.end_year
            );
        }
    }

    if !record.skills.is_empty() {
        let _ = writeln!(output, "\nSkills: {}", record.skills.join(", "));
    }

    if !record.projects.is_empty() {
        output.push_str("\nProjects:\n");
        for project in &record.projects {
            let marker = if project.provenance.is_synthesized() { " (generated)" } else { "" };
            let _ = writeln!(output, "  {}{}", project.name, marker);
        }
    }

    if !record.certifications.is_empty() {
        output.push_str("\nCertifications:\n");
        for cert in &record.certifications {
            let _ = writeln!(output, "  {} {} {}", cert.name, cert.issuer, cert.year);
        }
    }

    if !record.languages.is_empty() {
        let languages: Vec<String> = record
            .languages
            .iter()
            .map(|l| {
                if l.proficiency.is_empty() {
                    l.language.clone()
                } else {
                    format!("{} ({})", l.language, l.proficiency)
                }
            })
            .collect();
        let _ = writeln!(output, "\nLanguages: {}", languages.join(", "));
    }

    if !record.interests.is_empty() {
        let _ = writeln!(output, "\nInterests: {}", record.interests.join(", "));
    }

    output
}
