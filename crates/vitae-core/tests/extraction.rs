//! End-to-end extraction behavior through the public API.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use vitae_core::{
    extract, extract_job, ExtractionHints, ExtractionRecord, HeuristicExtractor, Provenance,
    RawDocument, RecordExtractor, ResumeParser, SourceKind,
};

fn plain() -> ExtractionHints {
    ExtractionHints::default()
}

#[test]
fn test_contact_experience_and_education() {
    let text = "Jane Smith\njane.smith@example.com\n(415) 555-0100\n\nEXPERIENCE\nSenior Engineer, Acme Corp\n2020-2023\n• Led platform rewrite\n\nEDUCATION\nB.S. Computer Science, State University\n2016-2020";
    let record = extract(text, &plain());

    assert_eq!(record.personal.full_name, "Jane Smith");
    assert_eq!(record.personal.email, "jane.smith@example.com");
    assert_eq!(record.personal.phone, "(415) 555-0100");

    assert_eq!(record.experience.len(), 1);
    let job = &record.experience[0];
    assert_eq!(job.position, "Senior Engineer");
    assert_eq!(job.company, "Acme Corp");
    assert_eq!(job.start_year, "2020");
    assert_eq!(job.end_year, "2023");
    assert!(job.description.contains("Led platform rewrite"));

    assert_eq!(record.education.len(), 1);
    assert!(record.education[0].school.contains("State University"));
    assert_eq!(record.education[0].start_year, "2016");
    assert_eq!(record.education[0].end_year, "2020");
}

#[test]
fn test_empty_input() {
    let record = extract("", &plain());
    assert_eq!(record, ExtractionRecord::default());
    assert!(record.is_empty());
}

#[test]
fn test_inline_skills_only() {
    let record = extract("Skills: Python, React, Leadership, Zorblax", &plain());

    assert_eq!(record.skills, vec!["Python", "React", "Leadership"]);
    assert!(record.experience.is_empty());
    assert!(record.education.is_empty());
    assert!(record.projects.is_empty());
    assert!(record.personal.summary.is_empty());
    assert!(record.certifications.is_empty());
    assert!(record.languages.is_empty());
    assert!(record.interests.is_empty());
}

#[test]
fn test_undated_experience_is_kept() {
    let text = "Jane Doe\n\nEXPERIENCE\nSenior Engineer at Acme Corp\n• Built the billing system\n• Mentored two engineers";
    let record = extract(text, &plain());

    assert_eq!(record.experience.len(), 1);
    let job = &record.experience[0];
    assert_eq!(job.position, "Senior Engineer");
    assert_eq!(job.company, "Acme Corp");
    assert_eq!(job.start_year, "");
    assert_eq!(job.end_year, "");
    assert_eq!(job.description, "Built the billing system\nMentored two engineers");
}

#[test]
fn test_odd_inputs_never_panic() {
    let long_line = "word ".repeat(20_000);
    let inputs = [
        "\0\0\0",
        "\n\n\n\n",
        "••••",
        "((((((((",
        "EXPERIENCE",
        "EXPERIENCE\nEDUCATION\nSKILLS\nPROJECTS",
        "🦀🦀🦀 résumé 履歴書 سيرة",
        "2020-2023 2020-2023 2020-2023",
        "@@@@.com",
        "+1 +1 +1 +1",
        "Ã©Ã©â€™â€”",
        long_line.as_str(),
    ];

    for input in inputs {
        for kind in [SourceKind::PlainText, SourceKind::Pdf, SourceKind::OfficeDocument] {
            let _ = extract(input, &ExtractionHints::new(kind));
            let _ = extract_job(input, &ExtractionHints::new(kind));
        }
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let extractor = HeuristicExtractor::new();
    let inputs = [
        "Jane\u{00a0}Smith\r\n\r\n\r\n* Led rewrite\u{2014}twice\n\u{2022}\u{2022} Shipped",
        "manage-\nment of teams\nSenior\tEngineer",
        "Ã©cole â€¢ bullet\u{200b}",
        "",
    ];

    for input in inputs {
        for kind in [SourceKind::PlainText, SourceKind::Pdf, SourceKind::OfficeDocument] {
            let hints = ExtractionHints::new(kind);
            let once = extractor.normalize(input, &hints);
            let twice = extractor.normalize(&once, &hints);
            assert_eq!(once, twice, "kind {:?}, input {:?}", kind, input);
        }
    }
}

#[test]
fn test_contact_characters_preserved() {
    let record = extract("**jane.smith@example.com**|(415) 555-0100", &plain());
    assert_eq!(record.personal.email, "jane.smith@example.com");
    assert_eq!(record.personal.phone, "(415) 555-0100");
}

#[test]
fn test_skill_cap() {
    let text = "SKILLS\nPython, Java, JavaScript, TypeScript, Rust, Go, Ruby, PHP, Swift, Kotlin, Scala, Haskell, Elixir, Dart, Lua, Bash, SQL, HTML, CSS, Sass, React, Angular, Vue, Django, Flask";
    let record = extract(text, &plain());
    assert_eq!(record.skills.len(), 20);
    assert_eq!(record.skills[0], "Python");

    let record = HeuristicExtractor::new().with_max_skills(5).extract(text, &plain());
    assert_eq!(record.skills.len(), 5);
}

#[test]
fn test_skills_outside_skills_section_are_ignored() {
    let text = "Jane Smith\n\nEXPERIENCE\nBackend Engineer at Acme\n2019 - 2022\n• Built services in Python and Kubernetes";
    let record = extract(text, &plain());
    assert!(record.skills.is_empty());
}

#[test]
fn test_synthesized_content_is_tagged() {
    let text = "Jane Smith\n\nEXPERIENCE\nBackend Engineer at Acme\n2019 - 2022\n\nSKILLS\nPython, Docker";
    let result = HeuristicExtractor::new().parse(&RawDocument::new(text));
    let record = &result.record;

    assert_eq!(record.personal.summary_provenance, Provenance::Synthesized);
    assert_eq!(
        record.personal.summary,
        "Professional with 1 role of experience and skills in Python and Docker."
    );
    assert_eq!(record.projects.len(), 1);
    assert_eq!(record.projects[0].provenance, Provenance::Synthesized);
    assert!(record.missing_fields().contains(&"summary"));
    assert!(result.warnings.iter().any(|w| w.starts_with("Generated a placeholder summary")));
}

#[test]
fn test_serialized_shape() {
    let record = extract("Jane Smith\njane@example.com", &plain());
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["personal"]["fullName"], "Jane Smith");
    assert_eq!(json["personal"]["email"], "jane@example.com");
    assert!(json["skills"].as_array().unwrap().is_empty());
}

#[test]
fn test_large_input_is_bounded() {
    let mut text = String::with_capacity(1 << 20);
    let chunks = [
        "EXPERIENCE\n",
        "Senior Engineer, Acme Corp, Austin, TX 2020 - Present\n",
        "((((((((((aaaaaaaaaa@@@@@@@@....----,,,,,\n",
        "• 2020-2021-2022-2023 to until present current\n",
        "SKILLS: Python, Rust, Go, react native, machine learning, zorblax\n",
        "Jane Q. Smith, San Francisco, CA, Berlin, Germany, +1 (415) 555-0100\n",
    ];
    while text.len() < (1 << 20) {
        for chunk in chunks {
            text.push_str(chunk);
        }
    }
    let one_line = text.replace('\n', " ");

    for input in [&text, &one_line] {
        let started = Instant::now();
        let _ = extract(input, &plain());
        let _ = extract_job(input, &plain());
        // Debug builds are far slower than release
        assert!(started.elapsed() < Duration::from_secs(30));
    }
}

#[test]
fn test_many_distinct_interests_stay_linear() {
    let mut text = String::from("INTERESTS\n");
    let mut i = 0;
    while text.len() < (1 << 20) {
        text.push_str(&format!("i{}, ", i));
        i += 1;
    }

    let started = Instant::now();
    let record = extract(&text, &plain());
    // The quadratic version needed minutes here
    assert!(started.elapsed() < Duration::from_secs(10));

    assert_eq!(record.interests.len(), i);
    assert_eq!(record.interests[0], "i0");
}

#[test]
fn test_education_before_experience_stays_isolated() {
    let text = "Jane Smith\n\nEDUCATION\nB.S. Computer Science, State University\n2012-2016\n\nEXPERIENCE\nSenior Engineer at Acme Corp\n2016-2020\nBoston College\nMaster of Science\n2018";
    let record = extract(text, &plain());

    assert_eq!(record.education.len(), 1);
    let school = &record.education[0];
    assert!(school.school.contains("State University"));
    assert_eq!(school.start_year, "2012");
    assert_eq!(school.end_year, "2016");
    assert!(record
        .education
        .iter()
        .all(|e| !e.school.contains("Boston") && !e.degree.contains("Master")));

    assert_eq!(record.experience[0].position, "Senior Engineer");
    assert_eq!(record.experience[0].company, "Acme Corp");
}

#[test]
fn test_experience_before_education_stays_isolated() {
    let text = "Jane Smith\n\nEXPERIENCE\nSenior Engineer at Acme Corp\n2016-2020\n\nEDUCATION\nB.S. Computer Science, State University\n2012-2016\nSenior Engineer at Initech";
    let record = extract(text, &plain());

    assert_eq!(record.experience.len(), 1);
    let job = &record.experience[0];
    assert_eq!(job.company, "Acme Corp");
    assert_eq!(job.start_year, "2016");
    assert!(!job.description.contains("State University"));
    assert!(record
        .experience
        .iter()
        .all(|e| !e.company.contains("Initech") && !e.position.contains("State University")));

    assert_eq!(record.education.len(), 1);
    assert!(record.education[0].school.contains("State University"));
}

#[test]
fn test_job_posting() {
    let text = "Platform Engineer at Initech\nLocation: Remote\n\nWhat you'll do:\n• Run our Kubernetes clusters\n• Automate deploys with Terraform\n\nRequirements:\n• 3+ years with AWS\n• Strong Python\n\nThis is a full-time position.";
    let job = extract_job(text, &plain());

    assert_eq!(job.title, "Platform Engineer");
    assert_eq!(job.company, "Initech");
    assert_eq!(job.location, "Remote");
    assert_eq!(job.employment_type, "Full-time");
    assert_eq!(job.responsibilities.len(), 2);
    assert_eq!(job.requirements, vec!["3+ years with AWS", "Strong Python"]);
    assert_eq!(job.skills, vec!["Kubernetes", "Terraform", "Aws", "Python"]);
}

#[test]
fn test_extractor_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HeuristicExtractor>();

    let extractor = std::sync::Arc::new(HeuristicExtractor::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let extractor = extractor.clone();
            std::thread::spawn(move || {
                let text = format!("Jane Smith\njane{}@example.com", i);
                extractor.extract(&text, &ExtractionHints::default()).personal.email
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("jane{}@example.com", i));
    }
}
