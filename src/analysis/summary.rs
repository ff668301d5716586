// src/analysis/summary.rs
//! Summary section metrics: clarity from sentence count, impact from the
//! impact-verb vocabulary.

use serde::Serialize;

use crate::annotation::{Annotator, PosTag};
use crate::patterns::IMPACT_VERBS;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub clarity: i32,
    pub impact: i32,
    pub feedback: String,
}

pub fn analyze(annotator: &dyn Annotator, text: &str) -> SummaryReport {
    let span = annotator.annotate(text);
    let sentence_count = span.sentence_count();

    let clarity = match sentence_count {
        2..=4 => 8,
        1 | 5 => 5,
        _ => 3,
    };

    // A verb counts when its lemma or its surface form is in the vocabulary,
    // so irregular inflections ("led", "grew") are not lost.
    let impact_verbs = span
        .tokens
        .iter()
        .filter(|t| {
            t.pos == PosTag::Verb
                && (IMPACT_VERBS.contains(&t.lemma.as_str())
                    || IMPACT_VERBS.contains(&t.text.to_lowercase().as_str()))
        })
        .count();
    let impact = if impact_verbs > 0 {
        (6.0 + impact_verbs as f64 * 2.5).min(10.0) as i32
    } else {
        4
    };

    let mut feedback = format!(
        "Summary ({} chars, {} sentences): ",
        text.chars().count(),
        sentence_count
    );
    if clarity >= 7 {
        feedback.push_str("Appears well-structured with an appropriate number of sentences. ");
    } else {
        feedback.push_str("Aim for 2-4 concise, impactful sentences for your summary. ");
    }
    if impact_verbs > 1 {
        feedback.push_str(&format!(
            "Effectively uses {} strong impact verb(s). ",
            impact_verbs
        ));
    } else if impact_verbs == 1 {
        feedback.push_str(&format!("Includes {} impact verb. ", impact_verbs));
    }
    if impact < 7 {
        feedback.push_str(
            "Consider incorporating more strong action verbs or highlighting key quantifiable achievements. ",
        );
    } else {
        feedback.push_str("Strong impact demonstrated.");
    }

    SummaryReport {
        clarity,
        impact,
        feedback,
    }
}
