//! Similarity scoring between resume fields and job requirements

use crate::embedding::{cosine_similarity, EmbeddingCapability};
use crate::error::{MatcherError, Result};
use log::warn;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Sub-score weights in the overall aggregation.
const SKILLS_WEIGHT: f32 = 0.5;
const EXPERIENCE_WEIGHT: f32 = 0.3;
const EDUCATION_WEIGHT: f32 = 0.2;

/// Semantic/keyword blend for the skills score when embeddings are available.
const SKILLS_SEMANTIC_WEIGHT: f32 = 0.7;
const SKILLS_KEYWORD_WEIGHT: f32 = 0.3;

/// Semantic/keyword blend for the education score.
const EDUCATION_SEMANTIC_WEIGHT: f32 = 0.6;
const EDUCATION_KEYWORD_WEIGHT: f32 = 0.4;

/// Ceiling factor when the candidate meets the required years.
const MET_REQUIREMENT_FACTOR: f32 = 85.0;

/// Factor when the candidate falls short of the required years.
const UNMET_REQUIREMENT_FACTOR: f32 = 70.0;

/// Score reported when a section carries no explicit requirement.
const NEUTRAL_SCORE: f32 = 50.0;

const STOP_WORDS: [&str; 14] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Computes the three sub-scores and the weighted overall score.
///
/// Stateless per call; the only shared state is the optional embedding
/// capability handle, which is read-only and safe for concurrent use.
pub struct SimilarityScorer {
    embedder: Option<Arc<dyn EmbeddingCapability>>,
    word_pattern: Regex,
    years_pattern: Regex,
    digits_pattern: Regex,
}

impl SimilarityScorer {
    pub fn new(embedder: Option<Arc<dyn EmbeddingCapability>>) -> Result<Self> {
        Ok(Self {
            embedder,
            word_pattern: Self::pattern(r"\w+")?,
            years_pattern: Self::pattern(r"(?i)(\d+)\s*years?")?,
            digits_pattern: Self::pattern(r"\d+")?,
        })
    }

    fn pattern(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| MatcherError::Processing(format!("Invalid scorer pattern: {}", e)))
    }

    /// Whether the semantic capability is present for this process.
    pub fn semantic_available(&self) -> bool {
        self.embedder.is_some()
    }

    /// Stop-word-filtered token-set overlap, as a percentage of the
    /// required token set. Returns 0 when either list is empty or the
    /// filtered required set is empty.
    pub fn keyword_similarity(&self, resume_items: &[String], required_items: &[String]) -> f32 {
        if resume_items.is_empty() || required_items.is_empty() {
            return 0.0;
        }

        let resume_words = self.word_set(resume_items);
        let required_words = self.word_set(required_items);
        if required_words.is_empty() {
            return 0.0;
        }

        let overlap = resume_words.intersection(&required_words).count();
        let similarity = (overlap as f32 / required_words.len() as f32) * 100.0;

        // Sets cannot push the overlap past the required count; the
        // cap stays as a documented part of the contract.
        similarity.min(100.0)
    }

    fn word_set(&self, items: &[String]) -> HashSet<String> {
        let text = items.join(" ").to_lowercase();
        self.word_pattern
            .find_iter(&text)
            .map(|word| word.as_str().to_string())
            .filter(|word| !STOP_WORDS.contains(&word.as_str()))
            .collect()
    }

    /// Embedding cosine similarity between the joined lists, scaled to
    /// a percentage and floored at 0. Returns 0 when the capability is
    /// absent, either list is empty, or the capability call fails; a
    /// failed call is logged and never propagated.
    pub fn semantic_similarity(&self, resume_items: &[String], required_items: &[String]) -> f32 {
        let Some(embedder) = &self.embedder else {
            return 0.0;
        };
        if resume_items.is_empty() || required_items.is_empty() {
            return 0.0;
        }

        let resume_text = resume_items.join(" ");
        let required_text = required_items.join(" ");

        match encoded_cosine(embedder.as_ref(), &resume_text, &required_text) {
            Ok(similarity) => (similarity * 100.0).max(0.0),
            Err(e) => {
                warn!("Semantic similarity calculation failed: {}", e);
                0.0
            }
        }
    }

    /// Skills sub-score: semantic/keyword blend when embeddings are
    /// available, plain keyword overlap otherwise. 0 when either side
    /// is empty.
    pub fn skills_match(&self, resume_skills: &[String], required_skills: &[String]) -> f32 {
        if resume_skills.is_empty() || required_skills.is_empty() {
            return 0.0;
        }

        let keyword = self.keyword_similarity(resume_skills, required_skills);
        if self.semantic_available() {
            let semantic = self.semantic_similarity(resume_skills, required_skills);
            semantic * SKILLS_SEMANTIC_WEIGHT + keyword * SKILLS_KEYWORD_WEIGHT
        } else {
            keyword
        }
    }

    /// Education sub-score. An empty resume section scores 0; an
    /// absent requirement is neutral, not a failure.
    pub fn education_match(
        &self,
        resume_education: &[String],
        required_education: &[String],
    ) -> f32 {
        if resume_education.is_empty() {
            return 0.0;
        }
        if required_education.is_empty() {
            return NEUTRAL_SCORE;
        }

        let keyword = self.keyword_similarity(resume_education, required_education);
        if self.semantic_available() {
            let semantic = self.semantic_similarity(resume_education, required_education);
            semantic * EDUCATION_SEMANTIC_WEIGHT + keyword * EDUCATION_KEYWORD_WEIGHT
        } else {
            keyword
        }
    }

    /// Experience sub-score with asymmetric reward: total resume years
    /// against the highest explicit requirement, rewarded with the 85
    /// factor when met and penalized with the 70 factor when short.
    pub fn experience_match(
        &self,
        resume_experience: &[String],
        required_experience: &[String],
    ) -> f32 {
        if resume_experience.is_empty() {
            return 0.0;
        }

        let resume_years: u64 = resume_experience
            .iter()
            .flat_map(|item| self.years_pattern.captures_iter(item))
            .filter_map(|caps| caps.get(1))
            .filter_map(|years| years.as_str().parse::<u64>().ok())
            .sum();

        let required_years = required_experience
            .iter()
            .filter_map(|req| self.digits_pattern.find(req))
            .filter_map(|years| years.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        if required_years == 0 {
            return NEUTRAL_SCORE;
        }

        let ratio = resume_years as f32 / required_years as f32;
        if resume_years >= required_years {
            (ratio * MET_REQUIREMENT_FACTOR).min(100.0)
        } else {
            ratio * UNMET_REQUIREMENT_FACTOR
        }
    }

    /// Weighted overall score, rounded to the nearest integer value.
    pub fn overall_score(&self, experience: f32, skills: f32, education: f32) -> f32 {
        (skills * SKILLS_WEIGHT + experience * EXPERIENCE_WEIGHT + education * EDUCATION_WEIGHT)
            .round()
    }
}

fn encoded_cosine(
    embedder: &dyn EmbeddingCapability,
    resume_text: &str,
    required_text: &str,
) -> Result<f32> {
    let resume_embedding = embedder.encode(resume_text)?;
    let required_embedding = embedder.encode(required_text)?;
    cosine_similarity(&resume_embedding, &required_embedding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn keyword_scorer() -> SimilarityScorer {
        SimilarityScorer::new(None).unwrap()
    }

    /// Deterministic capability: every text encodes to the same vector.
    struct ConstantEmbedder;

    impl EmbeddingCapability for ConstantEmbedder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn model_id(&self) -> &str {
            "constant"
        }
    }

    /// Capability whose calls always fail.
    struct BrokenEmbedder;

    impl EmbeddingCapability for BrokenEmbedder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Err(MatcherError::Embedding("encoder offline".to_string()))
        }

        fn model_id(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn keyword_similarity_counts_overlap_against_required_set() {
        let scorer = keyword_scorer();
        let similarity = scorer.keyword_similarity(
            &items(&["Python, Rust, SQL"]),
            &items(&["Python", "SQL", "Docker"]),
        );
        assert!((similarity - 200.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn keyword_similarity_is_zero_for_empty_inputs() {
        let scorer = keyword_scorer();
        assert_eq!(scorer.keyword_similarity(&[], &items(&["Rust"])), 0.0);
        assert_eq!(scorer.keyword_similarity(&items(&["Rust"]), &[]), 0.0);
    }

    #[test]
    fn keyword_similarity_ignores_stop_words() {
        let scorer = keyword_scorer();
        // Required reduces to {communication}; "of the and" contributes nothing.
        let similarity = scorer.keyword_similarity(
            &items(&["communication of the and"]),
            &items(&["the communication"]),
        );
        assert_eq!(similarity, 100.0);
    }

    #[test]
    fn keyword_similarity_is_zero_when_required_is_all_stop_words() {
        let scorer = keyword_scorer();
        assert_eq!(
            scorer.keyword_similarity(&items(&["anything"]), &items(&["of the and"])),
            0.0
        );
    }

    #[test]
    fn keyword_similarity_stays_in_bounds() {
        let scorer = keyword_scorer();
        let similarity =
            scorer.keyword_similarity(&items(&["a b c d e f g"]), &items(&["c"]));
        assert!((0.0..=100.0).contains(&similarity));
        assert_eq!(similarity, 100.0);
    }

    #[test]
    fn semantic_similarity_without_capability_is_zero() {
        let scorer = keyword_scorer();
        assert_eq!(
            scorer.semantic_similarity(&items(&["Rust"]), &items(&["Rust"])),
            0.0
        );
    }

    #[test]
    fn semantic_similarity_with_capability_scales_to_percentage() {
        let scorer = SimilarityScorer::new(Some(Arc::new(ConstantEmbedder))).unwrap();
        let similarity = scorer.semantic_similarity(&items(&["Rust"]), &items(&["Go"]));
        assert!((similarity - 100.0).abs() < 1e-3);
    }

    #[test]
    fn semantic_failure_degrades_to_zero_contribution() {
        let scorer = SimilarityScorer::new(Some(Arc::new(BrokenEmbedder))).unwrap();
        assert_eq!(
            scorer.semantic_similarity(&items(&["Rust"]), &items(&["Rust"])),
            0.0
        );

        // The blend still runs: 0.7 * 0 + 0.3 * keyword.
        let skills = scorer.skills_match(&items(&["Rust"]), &items(&["Rust"]));
        assert!((skills - 30.0).abs() < 1e-3);
    }

    #[test]
    fn skills_match_blends_when_capability_present() {
        let scorer = SimilarityScorer::new(Some(Arc::new(ConstantEmbedder))).unwrap();
        // semantic = 100, keyword = 100 -> 0.7 * 100 + 0.3 * 100.
        let skills = scorer.skills_match(&items(&["Rust"]), &items(&["Rust"]));
        assert!((skills - 100.0).abs() < 1e-3);
    }

    #[test]
    fn skills_match_is_zero_when_either_side_is_empty() {
        let scorer = SimilarityScorer::new(Some(Arc::new(ConstantEmbedder))).unwrap();
        assert_eq!(scorer.skills_match(&[], &items(&["Rust"])), 0.0);
        assert_eq!(scorer.skills_match(&items(&["Rust"]), &[]), 0.0);
    }

    #[test]
    fn education_empty_resume_scores_zero() {
        assert_eq!(keyword_scorer().education_match(&[], &items(&["BSc"])), 0.0);
    }

    #[test]
    fn education_without_requirement_is_neutral() {
        assert_eq!(
            keyword_scorer().education_match(&items(&["BSc CS"]), &[]),
            NEUTRAL_SCORE
        );
    }

    #[test]
    fn education_blends_when_capability_present() {
        let scorer = SimilarityScorer::new(Some(Arc::new(ConstantEmbedder))).unwrap();
        // semantic = 100, keyword = 0 -> 0.6 * 100.
        let education = scorer.education_match(&items(&["BSc"]), &items(&["MBA"]));
        assert!((education - 60.0).abs() < 1e-3);
    }

    #[test]
    fn experience_meeting_requirement_scores_eighty_five() {
        let scorer = keyword_scorer();
        let score = scorer.experience_match(
            &items(&["3 years backend", "2 years data"]),
            &items(&["5"]),
        );
        assert!((score - 85.0).abs() < 1e-3);
    }

    #[test]
    fn experience_shortfall_is_penalized() {
        let scorer = keyword_scorer();
        let score = scorer.experience_match(&items(&["2 years backend"]), &items(&["5"]));
        assert!((score - 28.0).abs() < 1e-3);
    }

    #[test]
    fn experience_exceeding_requirement_caps_at_one_hundred() {
        let scorer = keyword_scorer();
        let score = scorer.experience_match(&items(&["20 years backend"]), &items(&["5"]));
        assert!((score - 100.0).abs() < 1e-3);
    }

    #[test]
    fn experience_without_numeric_requirement_is_neutral() {
        let scorer = keyword_scorer();
        let score =
            scorer.experience_match(&items(&["2 years backend"]), &items(&["plenty of it"]));
        assert_eq!(score, NEUTRAL_SCORE);
    }

    #[test]
    fn experience_empty_resume_scores_zero() {
        assert_eq!(keyword_scorer().experience_match(&[], &items(&["5"])), 0.0);
    }

    #[test]
    fn required_years_take_the_maximum_first_integer() {
        let scorer = keyword_scorer();
        // Requirements mention 3 and 7; the 7 governs. 7 years on the
        // resume meets it exactly.
        let score = scorer.experience_match(
            &items(&["7 years engineering"]),
            &items(&["3 years minimum", "7 years preferred"]),
        );
        assert!((score - 85.0).abs() < 1e-3);
    }

    #[test]
    fn overall_score_is_the_fixed_linear_combination() {
        let scorer = keyword_scorer();
        assert_eq!(scorer.overall_score(80.0, 60.0, 100.0), 74.0);
    }
}
