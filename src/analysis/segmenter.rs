// src/analysis/segmenter.rs
//! Section segmentation. A small state machine walks the resume line by
//! line: it starts in `Preamble`, switches to `InSection(kind)` on the first
//! header line, and from then on every header closes the open section and
//! opens the next. The `SegmentedResume` it produces keeps every input line
//! (preamble, headers, content), so the whole pass is a lossless partition;
//! `sections()` derives the trimmed name→content view the analyzers consume.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::patterns::SECTION_HEADERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Awards,
    Publications,
    References,
    Contact,
    General,
}

impl SectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Awards => "awards",
            SectionKind::Publications => "publications",
            SectionKind::References => "references",
            SectionKind::Contact => "contact",
            SectionKind::General => "general",
        }
    }
}

/// One named section of resume text. Read-only once created.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
    /// True when the section was inferred from the preamble rather than
    /// introduced by a header line.
    pub implicit: bool,
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub kind: SectionKind,
    pub header: String,
    pub lines: Vec<String>,
}

/// Raw segmentation output. `preamble` holds the lines seen before the first
/// header; each segment holds its header line and the raw lines that
/// followed it. Together they reproduce the input line sequence exactly.
#[derive(Debug, Clone, Default)]
pub struct SegmentedResume {
    pub preamble: Vec<String>,
    pub segments: Vec<Segment>,
}

enum State {
    Preamble,
    InSection(usize),
}

/// A line is a header when a section pattern matches the whole trimmed line,
/// the line has fewer than 7 whitespace tokens, and it contains no digit.
/// Pattern declaration order breaks ties: first match wins.
fn header_kind(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.split_whitespace().count() >= 7 {
        return None;
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    SECTION_HEADERS
        .iter()
        .find(|(_, pattern)| pattern.is_match(trimmed))
        .map(|(kind, _)| *kind)
}

pub fn segment(text: &str) -> SegmentedResume {
    let mut out = SegmentedResume::default();
    let mut state = State::Preamble;

    for line in text.lines() {
        match header_kind(line) {
            Some(kind) => {
                out.segments.push(Segment {
                    kind,
                    header: line.to_string(),
                    lines: Vec::new(),
                });
                state = State::InSection(out.segments.len() - 1);
            }
            None => match state {
                State::Preamble => out.preamble.push(line.to_string()),
                State::InSection(idx) => out.segments[idx].lines.push(line.to_string()),
            },
        }
    }
    out
}

impl SegmentedResume {
    /// Name→content view. Header lines are excluded, content is trimmed,
    /// empty sections are dropped, and a repeated header overwrites the
    /// earlier occurrence. A qualifying preamble becomes an implicit summary
    /// (contact when a summary already exists); with no headers at all the
    /// whole text becomes one `general` section.
    pub fn sections(&self, source: &str) -> BTreeMap<SectionKind, Section> {
        let mut map = BTreeMap::new();
        for segment in &self.segments {
            let content = segment.lines.join("\n").trim().to_string();
            if content.is_empty() {
                continue;
            }
            map.insert(
                segment.kind,
                Section {
                    kind: segment.kind,
                    text: content,
                    implicit: false,
                },
            );
        }

        let preamble = self.preamble.join("\n").trim().to_string();
        if !preamble.is_empty()
            && !map.contains_key(&SectionKind::Summary)
            && !map.contains_key(&SectionKind::Contact)
        {
            let word_count = preamble.split_whitespace().count();
            if word_count > 5 && word_count < 150 {
                let kind = if !map.contains_key(&SectionKind::Summary) {
                    SectionKind::Summary
                } else {
                    SectionKind::Contact
                };
                map.insert(
                    kind,
                    Section {
                        kind,
                        text: preamble,
                        implicit: true,
                    },
                );
            }
        }

        if map.is_empty() {
            let whole = source.trim();
            if !whole.is_empty() {
                map.insert(
                    SectionKind::General,
                    Section {
                        kind: SectionKind::General,
                        text: whole.to_string(),
                        implicit: false,
                    },
                );
            }
        }
        map
    }
}
