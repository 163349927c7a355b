//! Resume field parsing

use crate::error::{MatcherError, Result};
use crate::matching::section::SectionExtractor;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sentinel reported when no candidate name can be located.
const UNKNOWN_CANDIDATE: &str = "Unknown Candidate";

/// Substrings that disqualify a header line from being a name.
const CONTACT_MARKERS: [&str; 4] = ["email", "phone", "address", "linkedin"];

/// Header lines scanned for a candidate name.
const NAME_SCAN_LINES: usize = 5;

const EXPERIENCE_KEYWORDS: [&str; 4] = [
    "experience",
    "work experience",
    "employment",
    "work history",
];
const EXPERIENCE_END: [&str; 4] = ["education", "skills", "projects", "achievements"];

const SKILL_KEYWORDS: [&str; 4] = [
    "skills",
    "technical skills",
    "core competencies",
    "expertise",
];
const SKILL_END: [&str; 4] = ["experience", "education", "projects", "achievements"];

const EDUCATION_KEYWORDS: [&str; 3] = ["education", "academic background", "qualifications"];
const EDUCATION_END: [&str; 4] = ["experience", "skills", "projects", "achievements"];

/// Structured candidate profile parsed from raw resume text.
///
/// Built once per request and immutable afterwards; the line items
/// keep their original document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: String,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

pub struct ResumeFieldParser {
    experience: SectionExtractor,
    skills: SectionExtractor,
    education: SectionExtractor,
    name_line: Regex,
    name_fallback: Regex,
}

impl ResumeFieldParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            experience: SectionExtractor::new(&EXPERIENCE_KEYWORDS, &EXPERIENCE_END)?,
            skills: SectionExtractor::new(&SKILL_KEYWORDS, &SKILL_END)?,
            education: SectionExtractor::new(&EDUCATION_KEYWORDS, &EDUCATION_END)?,
            name_line: Self::pattern(r"^[A-Za-z\s\.]+$")?,
            name_fallback: Self::pattern(r"(?i)name\s*:\s*(.+)")?,
        })
    }

    fn pattern(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| MatcherError::Processing(format!("Invalid name pattern: {}", e)))
    }

    pub fn parse(&self, text: &str) -> ParsedResume {
        ParsedResume {
            name: self.extract_name(text),
            experience: self.experience.extract(text),
            skills: self.skills.extract(text),
            education: self.education.extract(text),
        }
    }

    /// Candidate name heuristic.
    ///
    /// Scans the first few non-empty lines for one that carries no
    /// contact marker, consists of letters, spaces and periods only,
    /// and has at most 4 tokens; first qualifying line wins. Falls
    /// back to an explicit `Name:` label anywhere in the text, then to
    /// the sentinel.
    fn extract_name(&self, text: &str) -> String {
        for line in text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(NAME_SCAN_LINES)
        {
            let lower = line.to_lowercase();
            if CONTACT_MARKERS.iter().any(|marker| lower.contains(marker)) {
                continue;
            }
            if self.name_line.is_match(line) && line.split_whitespace().count() <= 4 {
                return line.to_string();
            }
        }

        if let Some(caps) = self.name_fallback.captures(text) {
            if let Some(name) = caps.get(1) {
                return name.as_str().trim().to_string();
            }
        }

        UNKNOWN_CANDIDATE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ResumeFieldParser {
        ResumeFieldParser::new().unwrap()
    }

    #[test]
    fn name_from_header_line() {
        let name = parser().extract_name("Jane A. Doe\nEmail: jane@x.com\nSkills\nRust");
        assert_eq!(name, "Jane A. Doe");
    }

    #[test]
    fn contact_lines_are_skipped() {
        let text = "Phone: 555-1234\nJohn Smith\nmore text";
        assert_eq!(parser().extract_name(text), "John Smith");
    }

    #[test]
    fn long_lines_do_not_qualify_as_names() {
        let text = "An Overly Long Headline About Myself\nName: John Smith";
        assert_eq!(parser().extract_name(text), "John Smith");
    }

    #[test]
    fn name_label_fallback() {
        let text = "12345\n!!!\nname : John Smith\n9999";
        assert_eq!(parser().extract_name(text), "John Smith");
    }

    #[test]
    fn unknown_candidate_sentinel() {
        assert_eq!(parser().extract_name("123\n456\n789"), UNKNOWN_CANDIDATE);
    }

    #[test]
    fn parses_all_sections() {
        let text = "Jane Doe\n\nExperience\n- 3 years at Acme\n\nSkills\nRust, SQL\n\nEducation\nBSc Computer Science";
        let resume = parser().parse(text);

        assert_eq!(resume.name, "Jane Doe");
        assert_eq!(resume.experience, vec!["3 years at Acme"]);
        assert_eq!(resume.skills, vec!["Rust, SQL"]);
        assert_eq!(resume.education, vec!["BSc Computer Science"]);
    }

    #[test]
    fn missing_sections_stay_empty() {
        let resume = parser().parse("Jane Doe\nJust a line of prose");
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.education.is_empty());
    }
}
