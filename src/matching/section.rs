//! Section extraction from free-form document text

use crate::error::{MatcherError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;

/// Extracts the line items of one named section from a document.
///
/// Built once per section kind from its alias keywords and the aliases
/// that terminate it. Resolution is purely positional: the earliest
/// alias occurrence opens the section and the earliest end alias
/// strictly after it closes the section, or the section runs to the
/// end of the text. Overlapping alias sets need no special handling;
/// first match wins.
pub struct SectionExtractor {
    section_matcher: AhoCorasick,
    end_matcher: AhoCorasick,
    bullet_prefix: Regex,
}

impl SectionExtractor {
    pub fn new(section_keywords: &[&str], end_keywords: &[&str]) -> Result<Self> {
        Ok(Self {
            section_matcher: Self::build_matcher(section_keywords)?,
            end_matcher: Self::build_matcher(end_keywords)?,
            bullet_prefix: Regex::new(r"^[-•*+\s]+")
                .map_err(|e| MatcherError::Processing(format!("Invalid bullet pattern: {}", e)))?,
        })
    }

    fn build_matcher(keywords: &[&str]) -> Result<AhoCorasick> {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .build(keywords)
            .map_err(|e| MatcherError::Processing(format!("Failed to build alias matcher: {}", e)))
    }

    /// Extract the section's line items in document order.
    ///
    /// The header line is dropped, as is every line that mentions any
    /// section or end alias (guards against re-matching nested
    /// headers). Leading bullet runs are stripped; empty remainders
    /// are discarded. No deduplication, no length limit.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let start = match self.section_matcher.find(text) {
            Some(m) => m.start(),
            None => return Vec::new(),
        };

        // The end scan begins strictly after the section start. The
        // match at `start` begins with an ASCII alias byte, so the +1
        // slice stays on a char boundary.
        let end = self
            .end_matcher
            .find(&text[start + 1..])
            .map(|m| start + 1 + m.start())
            .unwrap_or(text.len());

        let mut items = Vec::new();
        for line in text[start..end].lines().skip(1) {
            let line = line.trim();
            if line.is_empty()
                || self.section_matcher.is_match(line)
                || self.end_matcher.is_match(line)
            {
                continue;
            }

            let item = self.bullet_prefix.replace(line, "");
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }

        items
    }
}
