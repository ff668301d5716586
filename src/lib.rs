use std::sync::Arc;
use tracing::{debug, error, info};

pub mod analysis;
pub mod annotation;
pub mod config;
pub mod extract;
pub mod patterns;
pub mod utils;
pub mod web;

pub use analysis::{AnalysisResult, SectionReports, SkillMatcher};
pub use annotation::{Annotator, HeuristicAnnotator};
pub use web::start_web_server;

use analysis::segmenter::{self, SectionKind};
use analysis::{education, experience, projects, scoring, skills, summary};

/// The resume analysis capability: an annotation port plus the compiled
/// skill vocabulary. Built once before serving; cheap to clone and safe to
/// share across concurrent requests. When the annotation port failed to
/// load the analyzer runs degraded and every request gets the
/// annotation-unavailable result.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    annotator: Option<Arc<dyn Annotator>>,
    matcher: Arc<SkillMatcher>,
}

impl ResumeAnalyzer {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator: Some(annotator),
            matcher: Arc::new(SkillMatcher::from_vocabulary(&patterns::SKILL_VOCABULARY)),
        }
    }

    /// Analyzer without an annotation port. Every request returns the
    /// degraded result.
    pub fn degraded() -> Self {
        Self {
            annotator: None,
            matcher: Arc::new(SkillMatcher::from_vocabulary(&patterns::SKILL_VOCABULARY)),
        }
    }

    /// Load the default heuristic annotation port, falling back to degraded
    /// mode if it cannot be built.
    pub fn bootstrap() -> Self {
        match HeuristicAnnotator::load() {
            Ok(annotator) => {
                info!("Annotation port loaded");
                Self::new(Arc::new(annotator))
            }
            Err(e) => {
                error!("Failed to load annotation port, serving degraded: {}", e);
                Self::degraded()
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.annotator.is_none()
    }

    /// Analyze plain resume text. Never fails: degraded and empty-input
    /// outcomes come back as populated results.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let Some(annotator) = self.annotator.as_deref() else {
            return AnalysisResult::annotation_unavailable(text);
        };
        if text.trim().is_empty() {
            return AnalysisResult::empty_input();
        }

        let document = annotator.annotate(text);
        let present = self.matcher.find_in(&document);

        let sections = segmenter::segment(text).sections(text);
        info!(
            sections = sections.len(),
            keywords = present.len(),
            "Segmented resume"
        );
        for section in sections.values() {
            debug!(
                section = section.kind.name(),
                implicit = section.implicit,
                "Identified section"
            );
        }

        let mut reports = SectionReports::default();
        if let Some(section) = sections.get(&SectionKind::Summary) {
            reports.summary = Some(summary::analyze(annotator, &section.text));
        }
        if let Some(section) = sections.get(&SectionKind::Experience) {
            reports.experience = Some(experience::analyze(annotator, &section.text));
        }
        if let Some(section) = sections.get(&SectionKind::Skills) {
            reports.skills = Some(skills::analyze(annotator, &self.matcher, &section.text));
        }
        if let Some(section) = sections.get(&SectionKind::Education) {
            reports.education = Some(education::analyze(annotator, &section.text));
        }
        if let Some(section) = sections.get(&SectionKind::Projects) {
            reports.projects = Some(projects::analyze(annotator, &self.matcher, &section.text));
        }

        scoring::aggregate(text, &sections, reports, present)
    }
}
