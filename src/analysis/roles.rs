// src/analysis/roles.rs
//! Role segmentation inside the experience section, plus the per-entry
//! analyzer. The segmenter keeps one accumulator (lines + tracked title /
//! company / dates) and decides boundaries per non-blank line with a fixed
//! precedence: employment-date match, then organization change, then
//! job-title change. The precedence is kept even when a line satisfies
//! several heuristics at once.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::annotation::Annotator;
use crate::patterns::{BULLET_GLYPHS, EMPLOYMENT_DATE, JOB_TITLE_KEYWORDS, QUANTIFIABLE_PATTERNS};

const PLACEHOLDER: &str = "N/A";

/// One segmented role within the experience section. Ephemeral, scoped to a
/// single request.
#[derive(Debug, Clone, Serialize)]
pub struct JobEntry {
    pub role_text: String,
    pub title_guess: String,
    pub company_guess: String,
    pub dates_guess: String,
    pub action_verbs_count: usize,
    pub action_verb_lemmas: Vec<String>,
    pub bullet_points_count: usize,
    pub quantifiable_results_count: usize,
    pub feedback: String,
}

/// Per-line evidence the boundary decision runs on.
#[derive(Debug, Clone, Default)]
pub struct LineSignals {
    pub date: Option<String>,
    pub orgs: Vec<String>,
    pub title_like: bool,
}

pub fn line_signals(annotator: &dyn Annotator, line: &str) -> LineSignals {
    let date = EMPLOYMENT_DATE
        .find(line)
        .map(|m| m.as_str().trim().to_string());
    let span = annotator.annotate(line);
    let orgs: Vec<String> = span.org_entities().map(|e| e.text.clone()).collect();
    LineSignals {
        date,
        orgs,
        title_like: is_title_like(line),
    }
}

/// A short line counts as title-like when most of its words are title-cased
/// or uppercase and it mentions a job-title keyword.
fn is_title_like(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() >= 7 {
        return false;
    }
    let cased = words
        .iter()
        .filter(|w| is_title_word(w) || is_upper_word(w))
        .count();
    if 2 * cased <= words.len() {
        return false;
    }
    let lower = line.to_lowercase();
    JOB_TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn is_title_word(word: &str) -> bool {
    let mut alpha = word.chars().filter(|c| c.is_alphabetic());
    match alpha.next() {
        Some(first) if first.is_uppercase() => alpha.all(|c| c.is_lowercase()),
        _ => false,
    }
}

fn is_upper_word(word: &str) -> bool {
    let mut alpha = word.chars().filter(|c| c.is_alphabetic()).peekable();
    alpha.peek().is_some() && alpha.all(|c| c.is_uppercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Date,
    OrgChange,
    TitleChange,
}

#[derive(Debug, Default)]
struct Accumulator {
    lines: Vec<String>,
    title: Option<String>,
    company: Option<String>,
    dates: Option<String>,
}

/// Boundary decision over the tracked state, in precedence order. Returns
/// the first heuristic that fires.
pub(crate) fn boundary_kind(
    title: Option<&str>,
    company: Option<&str>,
    signals: &LineSignals,
    line: &str,
) -> Option<Boundary> {
    if signals.date.is_some() {
        return Some(Boundary::Date);
    }
    if let Some(org) = signals.orgs.first() {
        let changed = match company {
            None => true,
            Some(current) => !org.contains(current) || (org == current && signals.title_like),
        };
        if changed {
            return Some(Boundary::OrgChange);
        }
    }
    if signals.title_like {
        let line_lower = line.to_lowercase();
        let new_title = match title {
            None => true,
            Some(current) => !line_lower.contains(&current.to_lowercase()),
        };
        if new_title {
            return Some(Boundary::TitleChange);
        }
    }
    None
}

impl Accumulator {
    fn close(&mut self, annotator: &dyn Annotator) -> Option<JobEntry> {
        if self.lines.is_empty() {
            return None;
        }
        let role_text = self.lines.join("\n").trim().to_string();
        let mut entry = analyze_entry(annotator, &role_text);
        entry.title_guess = self.title.take().unwrap_or_else(|| PLACEHOLDER.to_string());
        entry.company_guess = self.company.take().unwrap_or_else(|| PLACEHOLDER.to_string());
        entry.dates_guess = self.dates.take().unwrap_or_else(|| PLACEHOLDER.to_string());
        self.lines.clear();
        Some(entry)
    }
}

/// Partition experience text into job entries. Every line lands in exactly
/// one entry. The boolean is false when segmentation fell back to a single
/// whole-text entry.
pub fn segment_roles(annotator: &dyn Annotator, text: &str) -> (Vec<JobEntry>, bool) {
    let mut entries = Vec::new();
    let mut acc = Accumulator::default();

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            acc.lines.push(line.to_string());
            continue;
        }
        let signals = line_signals(annotator, trimmed);
        let boundary = boundary_kind(
            acc.title.as_deref(),
            acc.company.as_deref(),
            &signals,
            trimmed,
        );
        if boundary.is_some() && i > 0 && !acc.lines.is_empty() {
            if let Some(entry) = acc.close(annotator) {
                entries.push(entry);
                acc.dates = signals.date.clone();
                acc.company = signals.orgs.first().cloned();
                if signals.title_like {
                    acc.title = Some(trimmed.to_string());
                }
                acc.lines.push(line.to_string());
                continue;
            }
        }
        acc.lines.push(line.to_string());
        if acc.title.is_none() && signals.title_like {
            acc.title = Some(trimmed.to_string());
        }
        if acc.company.is_none() {
            acc.company = signals.orgs.first().cloned();
        }
        if acc.dates.is_none() {
            acc.dates = signals.date;
        }
    }
    if let Some(entry) = acc.close(annotator) {
        entries.push(entry);
    }

    if entries.is_empty() {
        let mut fallback = analyze_entry(annotator, text);
        fallback.role_text = text.to_string();
        return (vec![fallback], false);
    }
    (entries, true)
}

/// Count bullets, opening action verbs and quantifiable results for one job
/// entry. When no bullet glyph is found, each sentence acts as a
/// pseudo-bullet under the same first-token-verb rule.
pub fn analyze_entry(annotator: &dyn Annotator, text: &str) -> JobEntry {
    let mut lemmas: BTreeSet<String> = BTreeSet::new();
    let mut bullets = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        let Some(first) = trimmed.chars().next() else {
            continue;
        };
        if !BULLET_GLYPHS.contains(&first) {
            continue;
        }
        bullets += 1;
        let remainder = trimmed[first.len_utf8()..].trim();
        let span = annotator.annotate(remainder);
        if let Some(token) = span.tokens.first() {
            if token.is_action_verb() {
                lemmas.insert(token.lemma.to_lowercase());
            }
        }
    }

    if bullets == 0 {
        let span = annotator.annotate(text);
        if span.sentence_count() > 0 {
            for token in span.sentence_openers() {
                if token.is_action_verb() {
                    lemmas.insert(token.lemma.to_lowercase());
                }
            }
            bullets = span.sentence_count();
        }
    }

    // Summed per pattern; overlapping substrings matched by different
    // patterns are counted once each (known over-count).
    let quantifiable: usize = QUANTIFIABLE_PATTERNS
        .iter()
        .map(|p| p.find_iter(text).count())
        .sum();

    let mut feedback = Vec::new();
    if bullets > 0 {
        if lemmas.len() as f64 >= bullets as f64 * 0.6 {
            feedback.push(format!("Good use of action verbs ({} found).", lemmas.len()));
        } else {
            feedback.push(
                "Strengthen bullet points by starting them with varied, strong action verbs."
                    .to_string(),
            );
        }
        if quantifiable as f64 >= bullets as f64 * 0.3 {
            feedback.push(format!(
                "Good inclusion of quantifiable results ({} metrics).",
                quantifiable
            ));
        } else {
            feedback.push(
                "Quantify more achievements within bullet points to show impact.".to_string(),
            );
        }
    } else {
        feedback.push("Consider using bullet points for clarity and impact.".to_string());
    }

    JobEntry {
        role_text: text.to_string(),
        title_guess: PLACEHOLDER.to_string(),
        company_guess: PLACEHOLDER.to_string(),
        dates_guess: PLACEHOLDER.to_string(),
        action_verbs_count: lemmas.len(),
        action_verb_lemmas: lemmas.into_iter().collect(),
        bullet_points_count: bullets,
        quantifiable_results_count: quantifiable,
        feedback: feedback.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HeuristicAnnotator;

    fn annotator() -> HeuristicAnnotator {
        HeuristicAnnotator::load().unwrap()
    }

    const EXPERIENCE: &str =
        "Senior Engineer, Acme Corp\n2019 - 2021\n- Increased revenue by 20%";

    #[test]
    fn date_line_starts_a_new_entry() {
        let a = annotator();
        let (entries, segmented) = segment_roles(&a, EXPERIENCE);
        assert!(segmented);
        let dated = entries
            .iter()
            .find(|e| e.dates_guess == "2019 - 2021")
            .expect("entry carrying the date line");
        assert!(dated.quantifiable_results_count >= 1);
    }

    #[test]
    fn first_entry_backfills_title_and_company() {
        let a = annotator();
        let (entries, _) = segment_roles(&a, EXPERIENCE);
        let first = &entries[0];
        assert_eq!(first.title_guess, "Senior Engineer, Acme Corp");
        assert_eq!(first.company_guess, "Acme Corp");
    }

    #[test]
    fn no_lines_are_dropped() {
        let a = annotator();
        let (entries, _) = segment_roles(&a, EXPERIENCE);
        let mut covered: Vec<String> = Vec::new();
        for entry in &entries {
            covered.extend(
                entry
                    .role_text
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| l.trim().to_string()),
            );
        }
        let expected: Vec<String> = EXPERIENCE
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.trim().to_string())
            .collect();
        assert_eq!(covered, expected);
    }

    #[test]
    fn boundary_precedence_prefers_dates() {
        let a = annotator();
        let line = "Acme Corp, Jan 2020 - Mar 2022";
        let signals = line_signals(&a, line);
        assert!(signals.date.is_some());
        assert!(!signals.orgs.is_empty());
        let kind = boundary_kind(None, Some("Globex Inc"), &signals, line);
        assert_eq!(kind, Some(Boundary::Date));
    }

    #[test]
    fn same_company_with_new_title_is_a_boundary() {
        let a = annotator();
        let line = "Staff Engineer, Acme Corp";
        let signals = line_signals(&a, line);
        let kind = boundary_kind(Some("Senior Engineer, Acme Corp"), Some("Acme Corp"), &signals, line);
        assert_eq!(kind, Some(Boundary::OrgChange));
    }

    #[test]
    fn tracked_title_suppresses_title_boundary() {
        let signals = LineSignals {
            date: None,
            orgs: vec![],
            title_like: true,
        };
        let kind = boundary_kind(Some("Senior Engineer"), None, &signals, "Senior Engineer");
        assert_eq!(kind, None);
    }

    #[test]
    fn empty_text_falls_back_to_single_entry() {
        let a = annotator();
        let (entries, segmented) = segment_roles(&a, "");
        assert!(!segmented);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title_guess, "N/A");
        assert_eq!(entries[0].company_guess, "N/A");
        assert_eq!(entries[0].dates_guess, "N/A");
    }

    #[test]
    fn bullet_openers_feed_the_verb_set() {
        let a = annotator();
        let entry = analyze_entry(&a, "- Managed a platform team\n- Reduced deploy times\n- the old notes");
        assert_eq!(entry.bullet_points_count, 3);
        assert_eq!(
            entry.action_verb_lemmas,
            vec!["manage".to_string(), "reduce".to_string()]
        );
    }

    #[test]
    fn sentences_act_as_pseudo_bullets() {
        let a = annotator();
        let entry = analyze_entry(&a, "Built the data pipeline. Reduced costs significantly.");
        assert_eq!(entry.bullet_points_count, 2);
        assert!(entry.action_verb_lemmas.contains(&"build".to_string()));
        assert!(entry.action_verb_lemmas.contains(&"reduce".to_string()));
    }

    #[test]
    fn overlapping_patterns_double_count() {
        let a = annotator();
        let entry = analyze_entry(&a, "- Increased by 20%");
        // "20%" counts under the plain numeric pattern and again under the
        // metric-verb pattern.
        assert!(entry.quantifiable_results_count >= 2);
    }
}
