// src/analysis/scoring.rs
//! Scoring aggregation: combines the per-section reports and the document
//! keyword scan into the four scores and the suggestion list. All numeric
//! policy lives here; the formulas mirror what the per-section analyzers
//! can achieve (summary 20, experience 30, skills 20, education 10,
//! projects 20).

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::analysis::education::EducationReport;
use crate::analysis::experience::ExperienceReport;
use crate::analysis::projects::ProjectsReport;
use crate::analysis::segmenter::{Section, SectionKind};
use crate::analysis::skills::SkillsReport;
use crate::analysis::summary::SummaryReport;
use crate::patterns::SKILL_VOCABULARY;
use crate::utils;

const PREVIEW_CHARS: usize = 1000;
const MISSING_KEYWORD_WINDOW: usize = 50;
const MISSING_KEYWORD_LIMIT: usize = 15;

#[derive(Debug, Clone, Serialize, Default)]
pub struct SectionReports {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsReport>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct KeywordReport {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// The complete assessment returned for one request. Never mutated after
/// return; degraded outcomes are reported through `error` and the one-item
/// suggestion list rather than as faults.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub score: i32,
    #[serde(rename = "contentQuality")]
    pub content_quality: i32,
    #[serde(rename = "atsCompatibility")]
    pub ats_compatibility: i32,
    #[serde(rename = "keywordOptimization")]
    pub keyword_optimization: i32,
    pub suggestions: Vec<String>,
    pub keywords: KeywordReport,
    pub sections: SectionReports,
    pub raw_text_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Terminal outcome: the annotation capability never loaded.
    pub fn annotation_unavailable(text: &str) -> Self {
        Self {
            score: 0,
            content_quality: 0,
            ats_compatibility: 0,
            keyword_optimization: 0,
            suggestions: vec![
                "Critical NLP component failed to load. Please contact support.".to_string(),
            ],
            keywords: KeywordReport::default(),
            sections: SectionReports::default(),
            raw_text_preview: utils::prefix(text, PREVIEW_CHARS),
            error: Some(
                "NLP annotation capability could not be loaded. Analysis features are limited."
                    .to_string(),
            ),
        }
    }

    /// Terminal outcome: no extractable text.
    pub fn empty_input() -> Self {
        Self {
            score: 0,
            content_quality: 0,
            ats_compatibility: 0,
            keyword_optimization: 0,
            suggestions: vec![
                "The resume appears to be empty or unreadable. Please upload a text-based PDF."
                    .to_string(),
            ],
            keywords: KeywordReport::default(),
            sections: SectionReports::default(),
            raw_text_preview: "No text extracted.".to_string(),
            error: Some("Could not extract readable text from the resume.".to_string()),
        }
    }
}

pub fn aggregate(
    text: &str,
    sections: &BTreeMap<SectionKind, Section>,
    reports: SectionReports,
    present: Vec<String>,
) -> AnalysisResult {
    let mut weighted_total = 0.0;
    let mut max_weighted = 0.0;
    let mut found_sections = 0usize;

    if let Some(summary) = &reports.summary {
        weighted_total += (summary.clarity + summary.impact) as f64 * 0.15;
        max_weighted += 0.15 * 20.0;
        found_sections += 1;
    }
    if let Some(experience) = &reports.experience {
        weighted_total += (experience.unique_action_verbs as f64
            + experience.quantifiable_results_count as f64 * 2.0)
            * 0.30;
        max_weighted += 0.30 * 30.0;
        found_sections += 1;
    }
    if let Some(skills) = &reports.skills {
        weighted_total += (skills.relevance + skills.organization) as f64 * 0.15;
        max_weighted += 0.15 * 20.0;
        found_sections += 1;
    }
    if let Some(education) = &reports.education {
        weighted_total += education.clarity as f64 * 0.10;
        max_weighted += 0.10 * 10.0;
        found_sections += 1;
    }
    if let Some(projects) = &reports.projects {
        weighted_total += (projects.clarity + projects.impact) as f64 * 0.10;
        max_weighted += 0.10 * 20.0;
        found_sections += 1;
    }

    let structural = if max_weighted > 0.0 {
        weighted_total / max_weighted * 80.0
    } else {
        40.0
    };
    let keyword_bonus = (present.len() as f64 * 0.75).min(20.0);

    // A non-empty resume never scores below 50.
    let score = ((structural + keyword_bonus) as i32).clamp(50, 100);
    let content_quality = ((score as f64 * 0.85
        + keyword_bonus * 0.4
        + found_sections as f64 * 2.5) as i32)
        .clamp(55, 100);
    let ats_compatibility = (score - 15
        + if present.len() > 8 { 5 } else { 0 }
        + if found_sections >= 3 { 5 } else { 0 })
    .clamp(60, 98);
    let keyword_optimization = ((present.len() * 3) as i32).clamp(0, 100);

    let suggestions = build_suggestions(text, sections, &reports, &present, found_sections);

    let present_lower: HashSet<String> = present.iter().map(|k| k.to_lowercase()).collect();
    let missing: Vec<String> = SKILL_VOCABULARY
        .iter()
        .take(MISSING_KEYWORD_WINDOW)
        .filter(|skill| !present_lower.contains(&skill.to_lowercase()))
        .take(MISSING_KEYWORD_LIMIT)
        .map(|s| s.to_string())
        .collect();

    AnalysisResult {
        score,
        content_quality,
        ats_compatibility,
        keyword_optimization,
        suggestions,
        keywords: KeywordReport { present, missing },
        sections: reports,
        raw_text_preview: utils::preview(text, PREVIEW_CHARS),
        error: None,
    }
}

/// Suggestions are generated per section/metric in a fixed order, then
/// deduplicated by exact text with generation order preserved.
fn build_suggestions(
    text: &str,
    sections: &BTreeMap<SectionKind, Section>,
    reports: &SectionReports,
    present: &[String],
    found_sections: usize,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    match &reports.summary {
        None => suggestions.push(
            "Add a 'Summary' or 'Objective' section to highlight your value proposition."
                .to_string(),
        ),
        Some(summary) if summary.clarity < 7 => suggestions.push(
            "Refine your Summary for clarity and conciseness (aim for 2-4 impactful sentences)."
                .to_string(),
        ),
        Some(summary) if summary.impact < 7 => suggestions.push(
            "Boost Summary impact with stronger action verbs and highlight key quantifiable achievements."
                .to_string(),
        ),
        Some(_) => {}
    }

    match &reports.experience {
        None => suggestions.push(
            "The 'Experience' section is vital; detail roles with strong action verbs and quantifiable results."
                .to_string(),
        ),
        Some(experience) => {
            let bullets = experience.bullet_points_count as f64;
            if (experience.quantifiable_results_count as f64) < f64::max(1.0, bullets * 0.25) {
                suggestions.push(
                    "Increase quantifiable results in your Experience section (e.g., 'Increased X by Y%'). Aim for at least 25% of points to be quantified."
                        .to_string(),
                );
            }
            if (experience.unique_action_verbs as f64) < f64::max(2.0, bullets * 0.5) {
                suggestions.push(
                    "Use more varied and strong action verbs at the start of Experience bullet points."
                        .to_string(),
                );
            }
            if experience.job_titles.is_empty() && experience.bullet_points_count > 0 {
                suggestions.push(
                    "Ensure job titles in Experience are clear and prominent for each role."
                        .to_string(),
                );
            }
            if experience.dates.is_empty() && experience.bullet_points_count > 1 {
                suggestions.push(
                    "Add employment dates for each role in Experience for better context."
                        .to_string(),
                );
            }
        }
    }

    let skills_weak = reports
        .skills
        .as_ref()
        .map(|s| s.relevance < 7)
        .unwrap_or(true);
    if skills_weak {
        suggestions.push(
            "Enhance your 'Skills' section: ensure it's comprehensive, well-organized (e.g., by category like 'Languages', 'Frameworks', 'Tools'), and lists skills relevant to your target roles."
                .to_string(),
        );
    } else if reports
        .skills
        .as_ref()
        .map(|s| s.organization < 7)
        .unwrap_or(false)
    {
        suggestions.push(
            "Improve the organization of your Skills section by grouping related skills or using clear formatting."
                .to_string(),
        );
    }

    if reports
        .education
        .as_ref()
        .map(|e| e.clarity < 7)
        .unwrap_or(true)
    {
        suggestions.push(
            "Ensure your 'Education' section clearly states degrees, institutions, and graduation dates (or expected). Consider adding GPA if strong, or relevant coursework/honors for recent graduates."
                .to_string(),
        );
    }

    let word_count = utils::word_count(text);
    match &reports.projects {
        None => {
            if sections.contains_key(&SectionKind::Projects) || word_count > 450 {
                suggestions.push(
                    "Consider adding or expanding a 'Projects' section to showcase practical application of your skills, especially personal or academic projects relevant to your field."
                        .to_string(),
                );
            }
        }
        Some(projects) => {
            if projects.project_count > 0
                && (projects.tech_keywords_count as f64)
                    < projects.project_count as f64 * 0.5
            {
                suggestions.push(
                    "In your 'Projects' section, clearly mention specific technologies or skills used for each project."
                        .to_string(),
                );
            }
            if projects.project_count > 0 && projects.clarity < 7 {
                suggestions.push(
                    "For each project, briefly describe its purpose, your role, and the outcome or impact if possible. Use bullet points for achievements."
                        .to_string(),
                );
            }
        }
    }

    if present.len() < 15 {
        suggestions.push(format!(
            "Your resume includes {} common skills. Broaden this by adding more relevant technical and soft skills tailored to job descriptions.",
            present.len()
        ));
    }

    if word_count < 350 && found_sections > 1 {
        suggestions.push(format!(
            "Your resume is concise ({} words). Ensure it captures all key experiences and skills. Aim for 1-2 pages (approx. 450-800 words for most roles).",
            word_count
        ));
    } else if word_count > 1000 {
        suggestions.push(format!(
            "Your resume is quite long ({} words). Condense information for readability, ideally within 1-2 pages, focusing on the most relevant details for your target roles.",
            word_count
        ));
    }

    suggestions.push(
        "Tailor your resume for each job application by highlighting the most relevant skills and experiences from the job description."
            .to_string(),
    );

    let has_core_section = [
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Education,
    ]
    .iter()
    .any(|kind| sections.contains_key(kind));
    if !has_core_section {
        suggestions.push(
            "Ensure your resume includes standard sections like Experience, Education, and Skills with clear headers for better ATS parsing and readability."
                .to_string(),
        );
    }

    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_sections() -> BTreeMap<SectionKind, Section> {
        BTreeMap::new()
    }

    #[test]
    fn scores_stay_in_range_with_no_sections() {
        let result = aggregate("some plain text", &no_sections(), SectionReports::default(), vec![]);
        assert!((0..=100).contains(&result.score));
        assert!((0..=100).contains(&result.content_quality));
        assert!((0..=100).contains(&result.ats_compatibility));
        assert!((0..=100).contains(&result.keyword_optimization));
        // Non-empty content never scores below 50.
        assert!(result.score >= 50);
    }

    #[test]
    fn keyword_bonus_is_capped() {
        let many: Vec<String> = (0..40).map(|i| format!("Skill{}", i)).collect();
        let result = aggregate("text", &no_sections(), SectionReports::default(), many);
        // base 40 + capped bonus 20 = 60
        assert_eq!(result.score, 60);
    }

    #[test]
    fn missing_keywords_has_exactly_fifteen_when_none_present() {
        let result = aggregate("text", &no_sections(), SectionReports::default(), vec![]);
        assert!(result.keywords.present.is_empty());
        assert_eq!(result.keywords.missing.len(), 15);
    }

    #[test]
    fn present_keywords_are_excluded_from_missing() {
        let result = aggregate(
            "text",
            &no_sections(),
            SectionReports::default(),
            vec!["Python".to_string(), "java".to_string()],
        );
        assert!(!result.keywords.missing.iter().any(|k| k == "Python"));
        assert!(!result.keywords.missing.iter().any(|k| k == "Java"));
    }

    #[test]
    fn suggestions_are_deduplicated_in_order() {
        let result = aggregate("text", &no_sections(), SectionReports::default(), vec![]);
        let mut seen = std::collections::HashSet::new();
        for s in &result.suggestions {
            assert!(seen.insert(s.clone()), "duplicate suggestion: {}", s);
        }
        // The generic tailoring reminder is always generated.
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.starts_with("Tailor your resume")));
    }

    #[test]
    fn empty_input_result_shape() {
        let result = AnalysisResult::empty_input();
        assert_eq!(result.score, 0);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.error.is_some());
    }

    #[test]
    fn degraded_result_shape() {
        let result = AnalysisResult::annotation_unavailable("text body");
        assert_eq!(result.score, 0);
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.error.is_some());
        assert_eq!(result.raw_text_preview, "text body");
    }

    #[test]
    fn long_preview_is_truncated() {
        let text = "x".repeat(1200);
        let result = aggregate(&text, &no_sections(), SectionReports::default(), vec![]);
        assert!(result.raw_text_preview.ends_with("..."));
        assert_eq!(result.raw_text_preview.chars().count(), 1003);
    }
}
