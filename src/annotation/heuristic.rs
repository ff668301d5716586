// src/annotation/heuristic.rs
//! Deterministic rule-based implementation of the annotation port: UAX-29
//! tokenization and sentence boundaries, a verb lexicon plus suffix rules
//! for lemmas and POS, stemmer fallback for everything else, and regex /
//! token-run heuristics for DATE and ORG entities. No model files and no
//! network: same text in, same annotation out.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

use super::{AnnotatedSpan, AnnotatedToken, Annotator, Entity, EntityLabel, PosTag};

static DATE_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+\d{4}(?:\s*[-–]\s*(?:(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+\d{4}|Present|Current))?|\b\d{4}\s*[-–]\s*(?:\d{4}|Present|Current)\b|\b(?:19|20)\d{2}\b",
    )
    .expect("valid date entity pattern")
});

/// Tokens that may join two capitalized runs inside one organization name.
const ORG_CONNECTORS: [&str; 4] = ["of", "and", "for", "&"];

/// A capitalized token run is only reported as an organization when one of
/// these words appears in it. Cuts down on ordinary title-cased phrases.
const ORG_SUFFIXES: [&str; 30] = [
    "inc",
    "llc",
    "ltd",
    "gmbh",
    "corp",
    "corporation",
    "company",
    "co",
    "group",
    "technologies",
    "technology",
    "labs",
    "laboratories",
    "systems",
    "solutions",
    "software",
    "consulting",
    "partners",
    "ventures",
    "capital",
    "bank",
    "media",
    "studios",
    "university",
    "institute",
    "college",
    "academy",
    "school",
    "agency",
    "foundation",
];

/// Base forms of verbs that open resume bullet points. Used both to tag
/// verbs and to validate suffix-stripped lemmas.
static VERB_LEXICON: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "accelerate", "achieve", "administer", "advise", "analyze", "architect", "automate",
        "build", "champion", "coach", "collaborate", "conduct", "consolidate", "coordinate",
        "create", "cut", "debug", "decrease", "define", "deliver", "deploy", "design",
        "develop", "direct", "drive", "eliminate", "engineer", "enhance", "ensure",
        "establish", "evaluate", "exceed", "execute", "expand", "facilitate", "forecast",
        "found", "generate", "grow", "guide", "identify", "implement", "improve", "increase",
        "initiate", "innovate", "integrate", "launch", "lead", "maintain", "manage",
        "mentor", "migrate", "modernize", "monitor", "negotiate", "operate", "optimize",
        "orchestrate", "organize", "oversee", "own", "partner", "pioneer", "plan",
        "present", "produce", "propose", "prototype", "publish", "raise", "redesign",
        "reduce", "refactor", "release", "research", "resolve", "scale", "secure", "ship",
        "simplify", "solve", "spearhead", "standardize", "streamline", "strengthen",
        "supervise", "support", "surpass", "teach", "test", "train", "transform",
        "translate", "troubleshoot", "upgrade", "win", "write",
    ]
    .into_iter()
    .collect()
});

/// Irregular inflections that suffix stripping cannot recover.
static IRREGULAR_VERBS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("led", "lead"),
        ("drove", "drive"),
        ("grew", "grow"),
        ("built", "build"),
        ("wrote", "write"),
        ("won", "win"),
        ("made", "make"),
        ("ran", "run"),
        ("held", "hold"),
        ("brought", "bring"),
        ("taught", "teach"),
        ("sold", "sell"),
        ("oversaw", "oversee"),
        ("rose", "rise"),
        ("undertook", "undertake"),
    ]
    .into_iter()
    .collect()
});

pub struct HeuristicAnnotator {
    stemmer: Stemmer,
    stopwords: HashSet<String>,
}

impl HeuristicAnnotator {
    pub fn load() -> Result<Self> {
        let stopwords: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();
        Ok(Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords,
        })
    }

    /// UAX-29 keeps period-joined words ("Node.js", "B.S.") as one segment;
    /// symbol-bearing skill patterns need the pieces. Split a word segment
    /// into alphanumeric runs and single symbol characters.
    fn push_subtokens(&self, raw: &str, tokens: &mut Vec<AnnotatedToken>) {
        let mut start = 0;
        for (i, c) in raw.char_indices() {
            if !c.is_alphanumeric() {
                if i > start {
                    tokens.push(self.token(&raw[start..i]));
                }
                tokens.push(self.token(&raw[i..i + c.len_utf8()]));
                start = i + c.len_utf8();
            }
        }
        if start < raw.len() {
            tokens.push(self.token(&raw[start..]));
        }
    }

    fn token(&self, raw: &str) -> AnnotatedToken {
        let lower = raw.to_lowercase();
        let is_alpha = !raw.is_empty() && raw.chars().all(|c| c.is_alphabetic());
        let (lemma, is_verb) = self.lemmatize(&lower, is_alpha);
        let pos = if is_verb {
            PosTag::Verb
        } else if is_alpha {
            PosTag::Noun
        } else if raw.chars().all(|c| c.is_ascii_digit()) {
            PosTag::Number
        } else if raw.chars().all(|c| !c.is_alphanumeric()) {
            PosTag::Punct
        } else {
            PosTag::Other
        };
        AnnotatedToken {
            text: raw.to_string(),
            lemma,
            pos,
            is_stop: self.stopwords.contains(&lower),
            is_alpha,
        }
    }

    /// Resolve a lowercased word to (lemma, is_verb). Irregular table first,
    /// then the lexicon, then suffix stripping validated against the
    /// lexicon, then the stemmer as a last resort.
    fn lemmatize(&self, lower: &str, is_alpha: bool) -> (String, bool) {
        if !is_alpha {
            return (lower.to_string(), false);
        }
        if let Some(base) = IRREGULAR_VERBS.get(lower) {
            return (base.to_string(), true);
        }
        if VERB_LEXICON.contains(lower) {
            return (lower.to_string(), true);
        }
        if lower.len() > 4 {
            if let Some(stem) = lower.strip_suffix("ied") {
                let candidate = format!("{}y", stem);
                if VERB_LEXICON.contains(candidate.as_str()) {
                    return (candidate, true);
                }
            }
            if let Some(stem) = lower.strip_suffix("ies") {
                let candidate = format!("{}y", stem);
                if VERB_LEXICON.contains(candidate.as_str()) {
                    return (candidate, true);
                }
            }
        }
        for suffix in ["ing", "ed"] {
            if let Some(stem) = lower.strip_suffix(suffix) {
                if stem.len() < 3 {
                    continue;
                }
                if VERB_LEXICON.contains(stem) {
                    return (stem.to_string(), true);
                }
                let restored = format!("{}e", stem);
                if VERB_LEXICON.contains(restored.as_str()) {
                    return (restored, true);
                }
                let mut chars = stem.chars().rev();
                if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
                    if a == b {
                        let undoubled = &stem[..stem.len() - a.len_utf8()];
                        if VERB_LEXICON.contains(undoubled) {
                            return (undoubled.to_string(), true);
                        }
                    }
                }
                // Unknown stem but a verb-shaped suffix: keep the stemmer's
                // best guess and still tag as a verb.
                if lower.len() >= 5 {
                    return (self.stemmer.stem(lower).to_string(), true);
                }
            }
        }
        for suffix in ["es", "s"] {
            if let Some(stem) = lower.strip_suffix(suffix) {
                if VERB_LEXICON.contains(stem) {
                    return (stem.to_string(), true);
                }
            }
        }
        (self.stemmer.stem(lower).to_string(), false)
    }

    fn scan_org_entities(&self, tokens: &[AnnotatedToken], range: std::ops::Range<usize>) -> Vec<Entity> {
        let mut found = Vec::new();
        let mut i = range.start;
        while i < range.end {
            if !is_capitalized(&tokens[i]) {
                i += 1;
                continue;
            }
            let mut last_cap = i;
            let mut j = i + 1;
            while j < range.end {
                if is_capitalized(&tokens[j]) {
                    last_cap = j;
                    j += 1;
                } else if is_connector(&tokens[j]) && j + 1 < range.end && is_capitalized(&tokens[j + 1]) {
                    j += 1;
                } else {
                    break;
                }
            }
            let run = &tokens[i..=last_cap];
            let has_suffix = run
                .iter()
                .any(|t| ORG_SUFFIXES.contains(&t.text.to_lowercase().as_str()));
            if has_suffix {
                let text = run
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                found.push(Entity {
                    label: EntityLabel::Org,
                    text,
                });
            }
            i = last_cap + 1;
        }
        found
    }
}

fn is_capitalized(token: &AnnotatedToken) -> bool {
    token.is_alpha
        && token
            .text
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
}

fn is_connector(token: &AnnotatedToken) -> bool {
    ORG_CONNECTORS.contains(&token.text.to_lowercase().as_str())
}

impl Annotator for HeuristicAnnotator {
    fn annotate(&self, text: &str) -> AnnotatedSpan {
        let mut tokens = Vec::new();
        let mut sentences = Vec::new();
        let mut entities = Vec::new();

        for sentence in text.split_sentence_bounds() {
            let start = tokens.len();
            for word in sentence.split_word_bounds() {
                if word.trim().is_empty() {
                    continue;
                }
                self.push_subtokens(word, &mut tokens);
            }
            if tokens.len() > start {
                sentences.push(start..tokens.len());
            }
        }

        for range in &sentences {
            entities.extend(self.scan_org_entities(&tokens, range.clone()));
        }
        for m in DATE_ENTITY.find_iter(text) {
            entities.push(Entity {
                label: EntityLabel::Date,
                text: m.as_str().trim().to_string(),
            });
        }

        AnnotatedSpan {
            tokens,
            entities,
            sentences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> HeuristicAnnotator {
        HeuristicAnnotator::load().unwrap()
    }

    fn texts(span: &AnnotatedSpan) -> Vec<&str> {
        span.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_symbol_bearing_names() {
        let span = annotator().annotate("C# and C++ and Node.js");
        assert_eq!(
            texts(&span),
            vec!["C", "#", "and", "C", "+", "+", "and", "Node", ".", "js"]
        );
    }

    #[test]
    fn irregular_verbs_resolve_to_base_lemma() {
        let span = annotator().annotate("Led a team");
        let led = &span.tokens[0];
        assert_eq!(led.lemma, "lead");
        assert_eq!(led.pos, PosTag::Verb);
        assert!(led.is_action_verb());
    }

    #[test]
    fn suffix_stripping_restores_final_e() {
        let span = annotator().annotate("Managed and increased output");
        assert_eq!(span.tokens[0].lemma, "manage");
        assert_eq!(span.tokens[2].lemma, "increase");
        assert_eq!(span.tokens[2].pos, PosTag::Verb);
    }

    #[test]
    fn stopwords_are_flagged() {
        let span = annotator().annotate("the team");
        assert!(span.tokens[0].is_stop);
        assert!(!span.tokens[1].is_stop);
    }

    #[test]
    fn sentence_boundaries() {
        let span = annotator().annotate("Shipped the release. Cut costs. Grew the team.");
        assert_eq!(span.sentence_count(), 3);
        let openers: Vec<&str> = span.sentence_openers().map(|t| t.text.as_str()).collect();
        assert_eq!(openers, vec!["Shipped", "Cut", "Grew"]);
    }

    #[test]
    fn newline_separates_sentences() {
        let span = annotator().annotate("Built the pipeline\nReduced latency");
        assert_eq!(span.sentence_count(), 2);
    }

    #[test]
    fn detects_org_with_suffix() {
        let span = annotator().annotate("Senior Engineer, Acme Corp");
        let orgs: Vec<&str> = span.org_entities().map(|e| e.text.as_str()).collect();
        assert_eq!(orgs, vec!["Acme Corp"]);
    }

    #[test]
    fn detects_org_with_connector() {
        let span = annotator().annotate("University of Texas");
        let orgs: Vec<&str> = span.org_entities().map(|e| e.text.as_str()).collect();
        assert_eq!(orgs, vec!["University of Texas"]);
    }

    #[test]
    fn plain_title_case_is_not_an_org() {
        let span = annotator().annotate("Senior Software Engineer");
        assert_eq!(span.org_entities().count(), 0);
    }

    #[test]
    fn detects_date_entities() {
        let span = annotator().annotate("Bachelor of Science, 2018");
        let dates: Vec<&str> = span.date_entities().map(|e| e.text.as_str()).collect();
        assert_eq!(dates, vec!["2018"]);

        let span = annotator().annotate("Jan 2019 - Mar 2021");
        assert!(span.date_entities().any(|e| e.text.contains("2019")));
    }

    #[test]
    fn annotation_is_deterministic() {
        let a = annotator();
        let text = "Led platform work at Initech Systems since 2020.";
        let first = a.annotate(text);
        let second = a.annotate(text);
        assert_eq!(texts(&first), texts(&second));
        assert_eq!(first.entities.len(), second.entities.len());
    }
}
