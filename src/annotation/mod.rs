// src/annotation/mod.rs
//! Text annotation port. The analysis core never talks to a concrete NLP
//! stack directly; it consumes this capability interface so analyzers can be
//! exercised against a deterministic fake in tests.

pub mod heuristic;

pub use heuristic::HeuristicAnnotator;

use std::ops::Range;

/// Coarse part-of-speech tag. Only the distinctions the analyzers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Verb,
    Noun,
    Number,
    Punct,
    Other,
}

#[derive(Debug, Clone)]
pub struct AnnotatedToken {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_alpha: bool,
}

impl AnnotatedToken {
    /// True for an alphabetic, non-stopword verb: the shape a strong
    /// bullet-point opener takes.
    pub fn is_action_verb(&self) -> bool {
        self.pos == PosTag::Verb && self.is_alpha && !self.is_stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Org,
    Date,
}

/// A named-entity span, reported as label plus surface text.
#[derive(Debug, Clone)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
}

/// Annotated view over one piece of text: tokens in order, entity spans, and
/// sentence boundaries as token-index ranges.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedSpan {
    pub tokens: Vec<AnnotatedToken>,
    pub entities: Vec<Entity>,
    pub sentences: Vec<Range<usize>>,
}

impl AnnotatedSpan {
    pub fn org_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.label == EntityLabel::Org)
    }

    pub fn date_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.label == EntityLabel::Date)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// First token of each sentence, in order.
    pub fn sentence_openers(&self) -> impl Iterator<Item = &AnnotatedToken> {
        self.sentences
            .iter()
            .filter_map(|range| self.tokens.get(range.start))
    }
}

/// The annotation capability. Implementations must be deterministic (same
/// text yields the same annotation) and thread-safe for concurrent reads;
/// the core invokes it many times per request (whole document, per section,
/// per candidate line).
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> AnnotatedSpan;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal fake port: whitespace tokens, no entities, one sentence.
    /// Proves the analyzers only depend on the trait surface.
    pub struct FakeAnnotator;

    impl Annotator for FakeAnnotator {
        fn annotate(&self, text: &str) -> AnnotatedSpan {
            let tokens: Vec<AnnotatedToken> = text
                .split_whitespace()
                .map(|w| AnnotatedToken {
                    text: w.to_string(),
                    lemma: w.to_lowercase(),
                    pos: PosTag::Other,
                    is_stop: false,
                    is_alpha: w.chars().all(|c| c.is_alphabetic()),
                })
                .collect();
            let sentences = if tokens.is_empty() {
                vec![]
            } else {
                vec![0..tokens.len()]
            };
            AnnotatedSpan {
                tokens,
                entities: vec![],
                sentences,
            }
        }
    }

    #[test]
    fn span_accessors() {
        let span = FakeAnnotator.annotate("Built a data pipeline");
        assert_eq!(span.tokens.len(), 4);
        assert_eq!(span.sentence_count(), 1);
        assert_eq!(span.sentence_openers().count(), 1);
        assert_eq!(span.org_entities().count(), 0);
    }

    #[test]
    fn empty_text_has_no_sentences() {
        let span = FakeAnnotator.annotate("");
        assert!(span.tokens.is_empty());
        assert_eq!(span.sentence_count(), 0);
    }
}
