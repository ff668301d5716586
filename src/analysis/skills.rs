// src/analysis/skills.rs
//! Skills section metrics: relevance from vocabulary hits, organization
//! from how many content lines carry each matched skill (more lines per
//! skill reads as categorized).

use serde::Serialize;

use crate::analysis::keywords::SkillMatcher;
use crate::annotation::Annotator;

#[derive(Debug, Clone, Serialize)]
pub struct SkillsReport {
    pub relevance: i32,
    pub organization: i32,
    pub feedback: String,
}

pub fn analyze(annotator: &dyn Annotator, matcher: &SkillMatcher, text: &str) -> SkillsReport {
    let span = annotator.annotate(text);
    let identified = matcher.find_in(&span);
    let line_count = text.matches('\n').count() + 1;

    let relevance = (identified.len() as f64 * 1.5).min(10.0) as i32;
    let organization = if line_count as f64 > f64::max(4.0, identified.len() as f64 / 2.0) {
        8
    } else if line_count > 2 {
        6
    } else {
        4
    };

    let examples = identified
        .iter()
        .take(6)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let mut feedback = format!(
        "Skills section ({} chars): Found {} relevant skills (e.g., {}{}). ",
        text.chars().count(),
        identified.len(),
        examples,
        if identified.len() > 6 { "..." } else { "" }
    );
    if organization > 6 {
        feedback.push_str("Appears well-organized. ");
    } else {
        feedback.push_str(
            "Consider categorizing skills (e.g., 'Programming Languages', 'Cloud Technologies', 'Tools') for enhanced readability and ATS parsing. ",
        );
    }
    feedback.push_str("Ensure skills listed are tailored to the requirements of target roles.");

    SkillsReport {
        relevance,
        organization,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HeuristicAnnotator;
    use crate::patterns::SKILL_VOCABULARY;

    fn analyze_text(text: &str) -> SkillsReport {
        let annotator = HeuristicAnnotator::load().unwrap();
        let matcher = SkillMatcher::from_vocabulary(&SKILL_VOCABULARY);
        analyze(&annotator, &matcher, text)
    }

    #[test]
    fn relevance_scales_with_matches_and_caps_at_ten() {
        let few = analyze_text("Python, Rust");
        assert_eq!(few.relevance, 3);

        let many = analyze_text(
            "Python, Java, Rust, Go, Docker, Kubernetes, Terraform, AWS, PostgreSQL, Redis",
        );
        assert_eq!(many.relevance, 10);
    }

    #[test]
    fn categorized_lists_score_higher_on_organization() {
        let categorized = "Languages: Python, Rust\nFrameworks: Django, Flask\nDatabases: PostgreSQL, Redis\nCloud: AWS, GCP\nTools: Docker, Terraform";
        let flat = "Python, Rust, Django, Flask, PostgreSQL, Redis, AWS, GCP, Docker, Terraform";
        assert!(analyze_text(categorized).organization > analyze_text(flat).organization);
    }

    #[test]
    fn feedback_names_detected_skills() {
        let report = analyze_text("Python and Docker");
        assert!(report.feedback.contains("Python"));
        assert!(report.feedback.contains("Docker"));
    }
}
