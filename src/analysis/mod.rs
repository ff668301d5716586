// src/analysis/mod.rs
//! The heuristic document-understanding pipeline: section segmentation,
//! role segmentation, per-section analyzers, keyword matching and scoring.

pub mod education;
pub mod experience;
pub mod keywords;
pub mod projects;
pub mod roles;
pub mod scoring;
pub mod segmenter;
pub mod skills;
pub mod summary;

pub use keywords::SkillMatcher;
pub use roles::JobEntry;
pub use scoring::{AnalysisResult, KeywordReport, SectionReports};
pub use segmenter::{Section, SectionKind, SegmentedResume};
