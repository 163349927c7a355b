//! Match orchestration
//! Wires the field parsers and the scorer into one result record

use crate::embedding::EmbeddingCapability;
use crate::error::Result;
use crate::matching::job::{JobRequirements, RequirementFieldParser};
use crate::matching::resume::{ParsedResume, ResumeFieldParser};
use crate::matching::scorer::SimilarityScorer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The four match percentages.
///
/// Component scores are truncated from the raw formula values; the
/// overall score is the rounded weighted combination of the raw
/// values, so it is computed before truncation, not from the three
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScores {
    pub experience_match: u32,
    pub skills_match: u32,
    pub education_match: u32,
    pub overall_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub parsed_resume: ParsedResume,
    pub job_requirements: JobRequirements,
    pub semantic_matching_used: bool,
}

/// Full structured result of one match computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_name: String,
    pub job_title: String,
    pub match_scores: MatchScores,
    pub details: MatchDetails,
}

/// Stateless matching pipeline: raw texts in, result record out.
///
/// Holds no per-request state; the embedding handle it carries is
/// process-wide and read-only, so one engine may serve concurrent
/// requests.
pub struct MatchEngine {
    resume_parser: ResumeFieldParser,
    job_parser: RequirementFieldParser,
    scorer: SimilarityScorer,
}

impl MatchEngine {
    pub fn new(embedder: Option<Arc<dyn EmbeddingCapability>>) -> Result<Self> {
        Ok(Self {
            resume_parser: ResumeFieldParser::new()?,
            job_parser: RequirementFieldParser::new()?,
            scorer: SimilarityScorer::new(embedder)?,
        })
    }

    /// Score a resume against a job description.
    ///
    /// Both inputs are raw extracted text; callers reject blank
    /// documents before calling. Deterministic given identical inputs
    /// and identical embedding responses.
    pub fn score(&self, resume_text: &str, job_text: &str) -> MatchResult {
        let parsed_resume = self.resume_parser.parse(resume_text);
        let job_requirements = self.job_parser.parse(job_text);

        let experience = self.scorer.experience_match(
            &parsed_resume.experience,
            &job_requirements.required_experience,
        );
        let skills = self
            .scorer
            .skills_match(&parsed_resume.skills, &job_requirements.required_skills);
        let education = self.scorer.education_match(
            &parsed_resume.education,
            &job_requirements.required_education,
        );
        let overall = self.scorer.overall_score(experience, skills, education);

        MatchResult {
            candidate_name: parsed_resume.name.clone(),
            job_title: job_requirements.title.clone(),
            match_scores: MatchScores {
                experience_match: experience as u32,
                skills_match: skills as u32,
                education_match: education as u32,
                overall_score: overall as u32,
            },
            details: MatchDetails {
                parsed_resume,
                job_requirements,
                semantic_matching_used: self.scorer.semantic_available(),
            },
        }
    }
}
