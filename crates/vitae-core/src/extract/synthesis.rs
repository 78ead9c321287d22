//! Placeholder content for records that would otherwise look blank.
//!
//! Everything produced here is tagged `Provenance::Synthesized`.

use crate::models::record::{ExperienceEntry, ExtractionRecord, Project, Provenance};

const TOP_SKILLS: usize = 3;

const PLACEHOLDER_PROJECT_DESCRIPTION: &str =
    "Placeholder generated from your work history. Replace it with a project you worked on.";

/// Fill a missing summary and missing projects when experience exists.
///
/// Returns the names of the fields that were synthesized.
pub fn apply_fallbacks(record: &mut ExtractionRecord) -> Vec<&'static str> {
    let mut synthesized = Vec::new();

    if record.personal.summary.is_empty() {
        if let Some(summary) = synthesize_summary(&record.experience, &record.skills) {
            record.personal.summary = summary;
            record.personal.summary_provenance = Provenance::Synthesized;
            synthesized.push("summary");
        }
    }

    if record.projects.is_empty() {
        if let Some(project) = synthesize_project(&record.experience, &record.skills) {
            record.projects.push(project);
            synthesized.push("projects");
        }
    }

    synthesized
}

/// One-sentence summary from the experience count and the top skills.
pub fn synthesize_summary(experience: &[ExperienceEntry], skills: &[String]) -> Option<String> {
    if experience.is_empty() {
        return None;
    }

    let count = experience.len();
    let roles = if count == 1 { "role" } else { "roles" };
    let mut summary = format!("Professional with {} {} of experience", count, roles);

    let top: Vec<&str> = skills.iter().take(TOP_SKILLS).map(String::as_str).collect();
    if !top.is_empty() {
        summary.push_str(" and skills in ");
        summary.push_str(&join_list(&top));
    }
    summary.push('.');

    Some(summary)
}

/// A single placeholder project named after the most recent employer.
pub fn synthesize_project(experience: &[ExperienceEntry], skills: &[String]) -> Option<Project> {
    if experience.is_empty() {
        return None;
    }

    let name = experience
        .iter()
        .map(|e| e.company.as_str())
        .find(|c| !c.is_empty())
        .map_or_else(|| "Professional Project".to_string(), |c| format!("Project at {}", c));

    Some(Project {
        name,
        description: PLACEHOLDER_PROJECT_DESCRIPTION.to_string(),
        technologies: skills.iter().take(TOP_SKILLS).cloned().collect(),
        provenance: Provenance::Synthesized,
    })
}

/// "A", "A and B", "A, B and C".
fn join_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn job(company: &str) -> ExperienceEntry {
        ExperienceEntry {
            company: company.to_string(),
            position: "Engineer".to_string(),
            ..ExperienceEntry::default()
        }
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summary_template() {
        let summary = synthesize_summary(&[job("Acme"), job("Beta")], &skills(&["Python", "Rust", "Sql", "Go"]));
        assert_eq!(
            summary.as_deref(),
            Some("Professional with 2 roles of experience and skills in Python, Rust and Sql.")
        );

        let summary = synthesize_summary(&[job("Acme")], &[]);
        assert_eq!(summary.as_deref(), Some("Professional with 1 role of experience."));

        assert_eq!(synthesize_summary(&[], &skills(&["Python"])), None);
    }

    #[test]
    fn test_project_placeholder() {
        let project = synthesize_project(&[job(""), job("Acme")], &skills(&["Python"])).unwrap();
        assert_eq!(project.name, "Project at Acme");
        assert_eq!(project.technologies, vec!["Python"]);
        assert!(project.provenance.is_synthesized());

        let project = synthesize_project(&[job("")], &[]).unwrap();
        assert_eq!(project.name, "Professional Project");
    }

    #[test]
    fn test_fallbacks_are_tagged_and_counted_missing() {
        let mut record = ExtractionRecord::new();
        record.experience.push(job("Acme"));

        let synthesized = apply_fallbacks(&mut record);
        assert_eq!(synthesized, vec!["summary", "projects"]);
        assert_eq!(record.projects.len(), 1);
        assert!(record.has_synthesized_content());
        assert!(record.missing_fields().contains(&"summary"));
        assert!(record.missing_fields().contains(&"projects"));
    }

    #[test]
    fn test_no_fallbacks_without_experience() {
        let mut record = ExtractionRecord::new();
        assert!(apply_fallbacks(&mut record).is_empty());
        assert_eq!(record, ExtractionRecord::new());
    }

    #[test]
    fn test_extracted_content_is_left_alone() {
        let mut record = ExtractionRecord::new();
        record.experience.push(job("Acme"));
        record.personal.summary = "Real summary".to_string();

        assert_eq!(apply_fallbacks(&mut record), vec!["projects"]);
        assert_eq!(record.personal.summary_provenance, Provenance::Extracted);
    }
}
