// src/analysis/education.rs
//! Education section facts: institutions from ORG entities, graduation
//! dates from DATE entities carrying a four-digit year, degrees from the
//! fixed pattern list, plus GPA and honors/coursework mentions. Clarity is
//! additive over the facets found.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::annotation::Annotator;
use crate::patterns::{DEGREE_CORE_KEYWORDS, DEGREE_PATTERNS, GPA_MENTION, HONORS_MENTION};

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year pattern"));

#[derive(Debug, Clone, Serialize)]
pub struct EducationReport {
    pub clarity: i32,
    pub impact: i32,
    pub feedback: String,
    pub degrees: Vec<String>,
    pub institutions: Vec<String>,
    pub grad_dates: Vec<String>,
    pub gpa_found: bool,
    pub honors_found: bool,
}

pub fn analyze(annotator: &dyn Annotator, text: &str) -> EducationReport {
    let span = annotator.annotate(text);

    let institutions: Vec<String> = span
        .org_entities()
        .map(|e| e.text.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let grad_dates: Vec<String> = span
        .date_entities()
        .filter(|e| FOUR_DIGIT_YEAR.is_match(&e.text))
        .map(|e| e.text.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut degree_set: BTreeSet<String> = BTreeSet::new();
    for pattern in DEGREE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let degree = m.as_str().trim().to_string();
            if degree.split_whitespace().count() < 12 {
                degree_set.insert(degree);
            }
        }
    }
    let degrees: Vec<String> = degree_set
        .into_iter()
        .filter(|d| {
            let lower = d.to_lowercase();
            d.split_whitespace().count() > 1
                || DEGREE_CORE_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .collect();

    let gpa_found = GPA_MENTION.is_match(text);
    let honors_found = HONORS_MENTION.is_match(text);

    let mut clarity = 2;
    if !institutions.is_empty() {
        clarity += 2;
    }
    if !degrees.is_empty() {
        clarity += 3;
    }
    if !grad_dates.is_empty() {
        clarity += 2;
    }
    if gpa_found || honors_found {
        clarity += 1;
    }
    let clarity = clarity.min(10);

    let mut feedback = Vec::new();
    if institutions.is_empty() {
        feedback.push("Institution names not clearly identified.".to_string());
    } else {
        feedback.push(format!(
            "Identified {} institution(s) (e.g., {}).",
            institutions.len(),
            institutions
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if degrees.is_empty() {
        feedback.push("Degree names not clearly identified.".to_string());
    } else {
        feedback.push(format!(
            "Identified {} degree(s) (e.g., {}).",
            degrees.len(),
            degrees[0]
        ));
    }
    if grad_dates.is_empty() {
        feedback.push("Graduation dates (or expected) not clearly identified.".to_string());
    }
    if !gpa_found {
        feedback.push(
            "If GPA is strong (e.g., 3.5+), consider adding it, especially if a recent graduate."
                .to_string(),
        );
    }
    if !honors_found {
        feedback
            .push("Consider adding relevant coursework or academic honors if applicable.".to_string());
    }
    if clarity < 7 {
        feedback.insert(
            0,
            "Ensure education details (institution, degree, graduation date) are clear.".to_string(),
        );
    } else {
        feedback.push("Education details seem relatively clear.".to_string());
    }

    EducationReport {
        clarity,
        impact: 0,
        feedback: feedback.join(" "),
        degrees,
        institutions,
        grad_dates,
        gpa_found,
        honors_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HeuristicAnnotator;

    fn analyze_text(text: &str) -> EducationReport {
        let annotator = HeuristicAnnotator::load().unwrap();
        analyze(&annotator, text)
    }

    #[test]
    fn extracts_degree_and_graduation_year() {
        let report = analyze_text("Bachelor of Science in Computer Science, 2018");
        assert!(report
            .degrees
            .iter()
            .any(|d| d.starts_with("Bachelor of Science")));
        assert!(report.grad_dates.iter().any(|d| d.contains("2018")));
    }

    #[test]
    fn extracts_institution_from_org_entity() {
        let report = analyze_text("University of Texas\nB.S. in Mathematics, 2020");
        assert_eq!(report.institutions, vec!["University of Texas".to_string()]);
    }

    #[test]
    fn clarity_is_additive_and_capped() {
        let full = analyze_text(
            "Stanford University\nMaster of Science in Statistics, 2019\nGPA: 3.9\nDean's List",
        );
        assert_eq!(full.clarity, 10);

        let sparse = analyze_text("took some classes");
        assert_eq!(sparse.clarity, 2);
    }

    #[test]
    fn detects_gpa_and_honors_mentions() {
        let report = analyze_text("B.S. 2017, GPA: 3.8, Cum Laude");
        assert!(report.gpa_found);
        assert!(report.honors_found);
    }

    #[test]
    fn overlong_degree_clause_is_rejected() {
        let text = "Certificate of completion in advanced modern cloud native distributed systems engineering and architecture practices";
        let report = analyze_text(text);
        assert!(report.degrees.is_empty());
    }
}
