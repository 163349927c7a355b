//! Job requirement extraction from job description text

use crate::error::{MatcherError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Title reported when the description carries no explicit label.
const DEFAULT_TITLE: &str = "Job Position";

/// Structured job requirements parsed from raw job description text.
///
/// Requirement lists keep document order; duplicates collected by
/// more than one pattern are intentionally preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub title: String,
    pub required_experience: Vec<String>,
    pub required_skills: Vec<String>,
    pub required_education: Vec<String>,
}

pub struct RequirementFieldParser {
    title: Regex,
    experience_patterns: Vec<Regex>,
    skills_block: Regex,
    skills_separators: Regex,
    education_patterns: Vec<Regex>,
}

impl RequirementFieldParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: Self::pattern(r"(?i)(role|position|title)\s*:\s*(.+)")?,
            experience_patterns: vec![
                Self::pattern(r"(?i)(\d+)\+?\s*years?\s*(of\s*)?experience")?,
                Self::pattern(r"(?i)experience\s*:\s*(.+)")?,
                Self::pattern(r"(?i)minimum\s*(\d+)\s*years?")?,
            ],
            // The block ends at a blank line, a line starting with a
            // letter ([A-Z] under (?i) matches lowercase too), or the
            // end of the text. The terminator is consumed rather than
            // looked ahead at; only the first block is taken, so the
            // captured text is unchanged.
            skills_block: Self::pattern(
                r"(?is)(skills|required|tools|technologies)\s*:(.+?)(?:\n\n|\n[A-Z]|\z)",
            )?,
            skills_separators: Self::pattern(r"[,;\n\-•*]+")?,
            education_patterns: vec![
                Self::pattern(r"(?i)(bachelor|master|phd|degree)\s*.*?(in\s*.+?)(?:[,\n.]|\z)")?,
                Self::pattern(r"(?i)education\s*:\s*(.+)")?,
            ],
        })
    }

    fn pattern(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| MatcherError::Processing(format!("Invalid requirement pattern: {}", e)))
    }

    pub fn parse(&self, text: &str) -> JobRequirements {
        JobRequirements {
            title: self.extract_title(text),
            required_experience: Self::collect_matches(&self.experience_patterns, text),
            required_skills: self.extract_skills(text),
            required_education: Self::collect_matches(&self.education_patterns, text),
        }
    }

    fn extract_title(&self, text: &str) -> String {
        self.title
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|title| title.as_str().trim().to_string())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Collect every match of every pattern, in pattern order then
    /// document order. Duplicates across patterns are kept.
    fn collect_matches(patterns: &[Regex], text: &str) -> Vec<String> {
        let mut collected = Vec::new();
        for pattern in patterns {
            for caps in pattern.captures_iter(text) {
                collected.push(join_groups(&caps));
            }
        }
        collected
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills_block
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|block| {
                self.skills_separators
                    .split(block.as_str())
                    .map(str::trim)
                    .filter(|skill| !skill.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Join the non-empty capture groups of one match with single spaces.
fn join_groups(caps: &Captures<'_>) -> String {
    let joined = caps
        .iter()
        .skip(1)
        .flatten()
        .map(|group| group.as_str())
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> RequirementFieldParser {
        RequirementFieldParser::new().unwrap()
    }

    #[test]
    fn title_from_any_label() {
        assert_eq!(parser().parse("Role: Backend Engineer").title, "Backend Engineer");
        assert_eq!(parser().parse("position : Data Analyst").title, "Data Analyst");
        assert_eq!(parser().parse("Title: Architect").title, "Architect");
    }

    #[test]
    fn title_defaults_when_unlabeled() {
        assert_eq!(parser().parse("We are hiring engineers.").title, DEFAULT_TITLE);
    }

    #[test]
    fn experience_collects_all_patterns_with_duplicates() {
        let requirements = parser().parse("Minimum 5 years experience required.");
        // "5 years experience" and "minimum 5 years" both match.
        assert_eq!(requirements.required_experience, vec!["5", "5"]);
    }

    #[test]
    fn experience_joins_matched_groups() {
        let requirements = parser().parse("You need 5+ years of experience.");
        assert_eq!(requirements.required_experience, vec!["5 of"]);
    }

    #[test]
    fn experience_label_captures_rest_of_line() {
        let requirements = parser().parse("Experience: shipped two products");
        assert_eq!(
            requirements.required_experience,
            vec!["shipped two products"]
        );
    }

    #[test]
    fn skills_split_on_mixed_separators() {
        let requirements = parser().parse("Skills: Python, SQL; Docker\n- Kubernetes");
        assert_eq!(
            requirements.required_skills,
            vec!["Python", "SQL", "Docker", "Kubernetes"]
        );
    }

    #[test]
    fn skills_block_stops_at_blank_line() {
        let requirements = parser().parse("Tools:\n- Git\n- Bazel\n\nWe offer snacks.");
        assert_eq!(requirements.required_skills, vec!["Git", "Bazel"]);
    }

    #[test]
    fn skills_block_stops_at_next_labeled_line() {
        let requirements = parser().parse("Skills: Rust, Go\nEducation: BSc");
        assert_eq!(requirements.required_skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn no_skills_block_yields_empty_list() {
        assert!(parser().parse("Just prose.").required_skills.is_empty());
    }

    #[test]
    fn education_collects_both_patterns() {
        let requirements = parser().parse("Education: Bachelor in Computer Science");
        assert_eq!(
            requirements.required_education,
            vec!["Bachelor in Computer Science", "Bachelor in Computer Science"]
        );
    }

    #[test]
    fn degree_phrase_stops_at_punctuation() {
        let requirements = parser().parse("A Master's degree in Data Science, or equivalent.");
        assert!(requirements
            .required_education
            .iter()
            .any(|e| e.ends_with("in Data Science")));
    }
}
