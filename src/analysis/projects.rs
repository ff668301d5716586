// src/analysis/projects.rs
//! Projects section metrics: likely project titles by line shape, tech
//! keywords via the vocabulary matcher.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::keywords::SkillMatcher;
use crate::annotation::Annotator;

/// Trailing "| tech stack" and "(details)" clauses stripped off a title
/// candidate.
static PIPE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|.*$").expect("valid pipe clause pattern"));
static PAREN_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(.*$").expect("valid paren clause pattern"));

/// A title line is not recognized right after a continuation: a previous
/// line ending in one of these suffixes means the current line continues a
/// sentence. Literal suffix test, so "Maryland" ends a line like "and" does.
const CONTINUATION_SUFFIXES: [&str; 11] = [
    ",", ";", "and", "or", "for", "with", "to", "in", "on", "at", "of",
];

const TITLE_BULLET_GLYPHS: [char; 3] = ['-', '*', '•'];

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsReport {
    pub clarity: i32,
    pub impact: i32,
    pub feedback: String,
    pub project_count: usize,
    pub tech_keywords_count: usize,
    pub project_titles: Vec<String>,
}

fn is_likely_title(line: &str, previous: Option<&str>) -> bool {
    let starts_upper = line
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false);
    if !starts_upper {
        return false;
    }
    if line.split_whitespace().count() >= 8 {
        return false;
    }
    if line
        .chars()
        .next()
        .map(|c| TITLE_BULLET_GLYPHS.contains(&c))
        .unwrap_or(false)
    {
        return false;
    }
    match previous {
        None => true,
        Some(prev) => !CONTINUATION_SUFFIXES.iter().any(|s| prev.ends_with(s)),
    }
}

pub fn analyze(annotator: &dyn Annotator, matcher: &SkillMatcher, text: &str) -> ProjectsReport {
    let lines: Vec<&str> = text.lines().collect();
    let mut project_count = 0usize;
    let mut titles: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let previous = if i == 0 {
            None
        } else {
            Some(lines[i - 1].trim())
        };
        if !is_likely_title(trimmed, previous) {
            continue;
        }
        project_count += 1;
        let candidate = PIPE_CLAUSE.replace(trimmed, "");
        let candidate = PAREN_CLAUSE.replace(&candidate, "").trim().to_string();
        if candidate.chars().count() > 2 && !titles.contains(&candidate) {
            titles.push(candidate);
        }
    }

    let tech_keywords = matcher.find_in(&annotator.annotate(text));
    let tech_count = tech_keywords.len();

    let mut clarity = 3;
    if project_count > 0 {
        clarity += 3;
    }
    if tech_count > 0 && project_count > 0 {
        clarity += 2;
    }
    if !titles.is_empty() {
        clarity += 1;
    }
    let clarity = clarity.min(10);
    let impact = (tech_count as f64 * 1.5 + project_count as f64).min(9.0) as i32;

    let mut feedback = Vec::new();
    if project_count == 0 && text.chars().count() > 50 {
        feedback.push(
            "No distinct projects clearly identified. If you have projects, ensure each has a clear title and is well-separated."
                .to_string(),
        );
    } else if project_count > 0 {
        feedback.push(format!(
            "Identified approximately {} project(s).",
            project_count
        ));
        if titles.is_empty() {
            feedback.push("Try to make project titles more prominent.".to_string());
        } else {
            feedback.push(format!(
                "Potential project titles include: {}{}.",
                titles
                    .iter()
                    .take(2)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                if titles.len() > 2 { "..." } else { "" }
            ));
        }
    }
    if tech_count > 0 {
        feedback.push(format!(
            "Good job mentioning {} technologies/skills within project descriptions (e.g., {}... ).",
            tech_count,
            tech_keywords
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    } else if project_count > 0 {
        feedback.push(
            "For each project, clearly list the key technologies, tools, or programming languages used to showcase your technical abilities."
                .to_string(),
        );
    }
    if project_count > 0 {
        feedback.push(
            "For each project, briefly describe its purpose, your specific role or contributions, and the outcome or impact if possible. Use bullet points for achievements."
                .to_string(),
        );
    }
    let feedback = if feedback.is_empty() {
        "Project section noted. Ensure each project details your role, technologies, and impact."
            .to_string()
    } else {
        feedback.join(" ")
    };

    let project_titles = titles.into_iter().take(3).collect();

    ProjectsReport {
        clarity,
        impact,
        feedback,
        project_count,
        tech_keywords_count: tech_count,
        project_titles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HeuristicAnnotator;
    use crate::patterns::SKILL_VOCABULARY;

    fn analyze_text(text: &str) -> ProjectsReport {
        let annotator = HeuristicAnnotator::load().unwrap();
        let matcher = SkillMatcher::from_vocabulary(&SKILL_VOCABULARY);
        analyze(&annotator, &matcher, text)
    }

    #[test]
    fn detects_titled_project_with_tech() {
        let report =
            analyze_text("Inventory Tracker | Python, Flask\n- Built barcode scanning for the warehouse");
        assert_eq!(report.project_count, 1);
        assert_eq!(report.project_titles, vec!["Inventory Tracker".to_string()]);
        assert!(report.tech_keywords_count >= 2);
        assert_eq!(report.clarity, 9);
    }

    #[test]
    fn bullet_lines_are_not_titles() {
        let report = analyze_text("- Built a scraper\n- Shipped a dashboard");
        assert_eq!(report.project_count, 0);
    }

    #[test]
    fn continuation_lines_are_not_titles() {
        let text = "Worked on data tooling for\nAnalytics Dashboard";
        let report = analyze_text(text);
        // "Analytics Dashboard" follows a line ending in "for".
        assert!(!report
            .project_titles
            .contains(&"Analytics Dashboard".to_string()));
    }

    #[test]
    fn paren_clause_is_stripped_from_title() {
        let report = analyze_text("Chess Engine (Rust rewrite)\n- Implemented alpha-beta search");
        assert_eq!(report.project_titles, vec!["Chess Engine".to_string()]);
    }
}
