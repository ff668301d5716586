// src/analysis/experience.rs
//! Experience section aggregate: runs role segmentation, sums per-entry
//! metrics, unions verb lemmas, and collects the non-placeholder title /
//! company / date guesses.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::analysis::roles::{segment_roles, JobEntry};
use crate::annotation::Annotator;

const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceReport {
    pub action_verbs_count: usize,
    pub unique_action_verbs: usize,
    pub quantifiable_results_count: usize,
    pub bullet_points_count: usize,
    pub job_titles: Vec<String>,
    pub companies: Vec<String>,
    pub dates: Vec<String>,
    pub feedback: String,
    pub parsed_roles: Vec<JobEntry>,
}

pub fn analyze(annotator: &dyn Annotator, text: &str) -> ExperienceReport {
    let (roles, segmented) = segment_roles(annotator, text);

    let total_verbs: usize = roles.iter().map(|r| r.action_verbs_count).sum();
    let total_quantifiables: usize = roles.iter().map(|r| r.quantifiable_results_count).sum();
    let total_bullets: usize = roles.iter().map(|r| r.bullet_points_count).sum();

    let mut lemma_union: BTreeSet<&str> = BTreeSet::new();
    for role in &roles {
        lemma_union.extend(role.action_verb_lemmas.iter().map(String::as_str));
    }
    let unique_verbs = lemma_union.len();

    let collect_sorted = |field: fn(&JobEntry) -> &str| -> Vec<String> {
        roles
            .iter()
            .map(field)
            .filter(|v| *v != PLACEHOLDER)
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };
    let job_titles = collect_sorted(|r| &r.title_guess);
    let companies = collect_sorted(|r| &r.company_guess);
    let dates = collect_sorted(|r| &r.dates_guess);

    let mut feedback = Vec::new();
    if !segmented {
        feedback.push(
            "Could not clearly segment individual job roles. Ensure each role has a clear title, company, and dates, possibly on separate lines or distinctly formatted."
                .to_string(),
        );
    }

    if total_bullets == 0 && text.chars().count() > 100 {
        feedback.push(
            "Consider using bullet points to list accomplishments for each role for readability."
                .to_string(),
        );
    } else if total_bullets > 0 {
        feedback.push(format!(
            "Across {} identified role(s), detected approximately {} descriptive points/bullets.",
            roles.len(),
            total_bullets
        ));
        if unique_verbs as f64 >= total_bullets as f64 * 0.5 {
            feedback.push(format!(
                "Good overall use of action verbs ({} unique verbs found).",
                unique_verbs
            ));
            if (unique_verbs as f64) < total_bullets as f64 * 0.8
                && unique_verbs as f64 > roles.len() as f64 * 1.5
            {
                feedback.push(
                    "Consider using an even wider variety of action verbs if appropriate."
                        .to_string(),
                );
            }
        } else if unique_verbs > 0 {
            feedback.push(format!(
                "Some points start with action verbs ({} unique verbs). Aim to start most bullet points with varied, strong action verbs.",
                unique_verbs
            ));
        } else {
            feedback.push(
                "Start each bullet point with a strong action verb to clearly state your actions and accomplishments."
                    .to_string(),
            );
        }
        if total_quantifiables as f64 >= total_bullets as f64 * 0.3 && total_bullets > 1 {
            feedback.push(format!(
                "Good inclusion of quantifiable results ({} metrics found across roles).",
                total_quantifiables
            ));
        } else if total_quantifiables > 0 {
            feedback.push(format!(
                "Some quantifiable results noted ({} metrics). Try to quantify more achievements.",
                total_quantifiables
            ));
        } else {
            feedback.push(
                "Increase quantification of achievements in your bullet points to demonstrate impact."
                    .to_string(),
            );
        }
    }

    if job_titles.is_empty() && total_bullets > 0 {
        feedback.push("Job titles are not clearly identifiable for all roles.".to_string());
    } else if !job_titles.is_empty() {
        feedback.push(format!(
            "Identified job titles like: {}{}.",
            job_titles
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            if job_titles.len() > 3 { "..." } else { "" }
        ));
    }
    if dates.is_empty() && total_bullets > 1 {
        feedback.push("Add employment dates for each role for clarity.".to_string());
    }

    if segmented {
        for role in &roles {
            let mut corrections = Vec::new();
            if (role.action_verbs_count as f64)
                < f64::max(1.0, role.bullet_points_count as f64 * 0.5)
            {
                corrections.push("enhance use of action verbs for its bullet points.");
            }
            if (role.quantifiable_results_count as f64)
                < f64::max(1.0, role.bullet_points_count as f64 * 0.25)
            {
                corrections.push("add more quantifiable achievements to its description.");
            }
            if !corrections.is_empty() {
                feedback.push(format!(
                    "For your role as '{}' at '{}': {}",
                    role.title_guess,
                    role.company_guess,
                    corrections.join(" ")
                ));
            }
        }
    }

    let feedback = if feedback.is_empty() {
        "Experience section noted. Ensure clear job titles, dates, and use action-oriented, quantified bullet points for each role."
            .to_string()
    } else {
        feedback.join(" ")
    };

    ExperienceReport {
        action_verbs_count: total_verbs,
        unique_action_verbs: unique_verbs,
        quantifiable_results_count: total_quantifiables,
        bullet_points_count: total_bullets,
        job_titles,
        companies,
        dates,
        feedback,
        parsed_roles: roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HeuristicAnnotator;

    fn analyze_text(text: &str) -> ExperienceReport {
        let annotator = HeuristicAnnotator::load().unwrap();
        analyze(&annotator, text)
    }

    const TWO_ROLES: &str = "Senior Engineer, Acme Corp\nJan 2019 - Mar 2021\n- Increased revenue by 20%\n- Managed a team of 5 engineers\n\nStaff Engineer, Globex Inc\n2021 - Present\n- Reduced costs by 30%\n- Launched two new products";

    #[test]
    fn aggregates_across_roles() {
        let report = analyze_text(TWO_ROLES);
        assert!(report.bullet_points_count >= 4);
        assert!(report.unique_action_verbs >= 4);
        assert!(report.quantifiable_results_count >= 2);
        assert!(report.companies.contains(&"Acme Corp".to_string()));
        assert!(report.companies.contains(&"Globex Inc".to_string()));
        assert!(!report.dates.is_empty());
    }

    #[test]
    fn guesses_are_sorted_and_deduplicated() {
        let report = analyze_text(TWO_ROLES);
        let mut sorted = report.job_titles.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(report.job_titles, sorted);
        assert!(!report.job_titles.contains(&"N/A".to_string()));
    }

    #[test]
    fn weak_role_gets_a_corrective_line() {
        let text = "Senior Developer, Initech Systems\n2018 - 2020\n- the legacy stack\n- some meetings";
        let report = analyze_text(text);
        assert!(report.feedback.contains("enhance use of action verbs"));
        assert!(report
            .feedback
            .contains("add more quantifiable achievements"));
    }

    #[test]
    fn long_prose_without_bullets_prompts_for_them() {
        let text = "I worked on many interesting systems over the years and was generally responsible for keeping the lights on while other people broke things around me constantly.";
        let report = analyze_text(text);
        assert!(report.bullet_points_count > 0 || report.feedback.contains("bullet points"));
    }
}
