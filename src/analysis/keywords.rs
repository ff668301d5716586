// src/analysis/keywords.rs
//! Vocabulary skill detection over annotated text. Every vocabulary entry is
//! compiled once into a token-sequence pattern; matching reports the entry's
//! canonical casing, never the raw matched text.

use std::collections::HashSet;

use crate::annotation::AnnotatedSpan;

#[derive(Debug, Clone)]
enum TokenPattern {
    /// Lowercased surface text must match exactly.
    Lower(String),
    /// Lemma match, with lowercased surface text accepted as the
    /// tokenizer-robust complement (exact names like "Pandas" would
    /// otherwise be lost to stemming).
    Lemma(String),
}

impl TokenPattern {
    fn matches(&self, token: &crate::annotation::AnnotatedToken) -> bool {
        match self {
            TokenPattern::Lower(s) => token.text.to_lowercase() == *s,
            TokenPattern::Lemma(s) => token.lemma == *s || token.text.to_lowercase() == *s,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillPattern {
    canonical: String,
    tokens: Vec<TokenPattern>,
}

impl SkillPattern {
    fn compile(name: &str) -> Self {
        let lower = name.to_lowercase();
        let has_symbol = lower
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

        let tokens = if has_symbol {
            // "C#" -> [c, #], "C++" -> [c, +, +], "Node.js" -> [node, ., js],
            // "CI/CD" -> [ci, /, cd]. Whitespace separates, symbols become
            // single-character literal tokens.
            let mut out = Vec::new();
            let mut run = String::new();
            for c in lower.chars() {
                if c.is_alphanumeric() {
                    run.push(c);
                } else {
                    if !run.is_empty() {
                        out.push(TokenPattern::Lower(std::mem::take(&mut run)));
                    }
                    if !c.is_whitespace() {
                        out.push(TokenPattern::Lower(c.to_string()));
                    }
                }
            }
            if !run.is_empty() {
                out.push(TokenPattern::Lower(run));
            }
            out
        } else if lower.contains(' ') {
            lower
                .split_whitespace()
                .map(|w| TokenPattern::Lower(w.to_string()))
                .collect()
        } else {
            vec![TokenPattern::Lemma(lower)]
        };

        Self {
            canonical: name.to_string(),
            tokens,
        }
    }
}

/// Compiled skill vocabulary. Built once before serving; immutable and
/// shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    patterns: Vec<SkillPattern>,
}

impl SkillMatcher {
    pub fn from_vocabulary(vocabulary: &[&str]) -> Self {
        Self {
            patterns: vocabulary.iter().map(|s| SkillPattern::compile(s)).collect(),
        }
    }

    /// Distinct canonical skill names detected in the span, in first-match
    /// order. Idempotent: identical input yields an identical list.
    pub fn find_in(&self, span: &AnnotatedSpan) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut found = Vec::new();
        for start in 0..span.tokens.len() {
            for pattern in &self.patterns {
                let end = start + pattern.tokens.len();
                if end > span.tokens.len() {
                    continue;
                }
                let window = &span.tokens[start..end];
                if pattern
                    .tokens
                    .iter()
                    .zip(window)
                    .all(|(p, t)| p.matches(t))
                    && seen.insert(pattern.canonical.to_lowercase())
                {
                    found.push(pattern.canonical.clone());
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Annotator, HeuristicAnnotator};
    use crate::patterns::SKILL_VOCABULARY;

    fn find(text: &str) -> Vec<String> {
        let annotator = HeuristicAnnotator::load().unwrap();
        let matcher = SkillMatcher::from_vocabulary(&SKILL_VOCABULARY);
        matcher.find_in(&annotator.annotate(text))
    }

    #[test]
    fn reports_canonical_casing() {
        let found = find("experienced with python and DOCKER");
        assert!(found.contains(&"Python".to_string()));
        assert!(found.contains(&"Docker".to_string()));
    }

    #[test]
    fn matches_symbol_bearing_names() {
        let found = find("Wrote services in C# and C++ with Node.js");
        assert!(found.contains(&"C#".to_string()));
        assert!(found.contains(&"C++".to_string()));
        assert!(found.contains(&"Node.js".to_string()));
    }

    #[test]
    fn matches_multi_word_names() {
        let found = find("Deployed on Google Cloud Platform with Spring Boot");
        assert!(found.contains(&"Google Cloud Platform".to_string()));
        assert!(found.contains(&"Spring Boot".to_string()));
    }

    #[test]
    fn no_vocabulary_hits_yields_empty() {
        assert!(find("gardening and birdwatching on weekends").is_empty());
    }

    #[test]
    fn repeated_mentions_are_distinct() {
        let found = find("Python, then more Python, always Python");
        assert_eq!(found, vec!["Python".to_string()]);
    }

    #[test]
    fn matching_is_idempotent() {
        let text = "Kubernetes and Terraform on AWS";
        assert_eq!(find(text), find(text));
    }
}
