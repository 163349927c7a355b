//! Report formatters for console and JSON output

use crate::config::OutputFormat;
use crate::error::Result;
use crate::matching::engine::MatchResult;
use colored::Colorize;

/// Trait for rendering a match result into a displayable report.
pub trait OutputFormatter {
    fn format_report(&self, result: &MatchResult) -> Result<String>;
}

/// Console formatter with colored score presentation.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data.
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn score_line(&self, label: &str, value: u32) -> String {
        let rendered = format!("{:>3}%", value);
        let rendered = if self.use_colors {
            match value {
                80.. => rendered.green().bold().to_string(),
                50..=79 => rendered.yellow().to_string(),
                _ => rendered.red().to_string(),
            }
        } else {
            rendered
        };
        format!("  {:<32} {}\n", label, rendered)
    }

    fn item_list(out: &mut String, heading: &str, items: &[String]) {
        out.push_str(&format!("\n{}\n", heading));
        if items.is_empty() {
            out.push_str("  (none found)\n");
        }
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, result: &MatchResult) -> Result<String> {
        let mut out = String::new();
        let scores = &result.match_scores;

        out.push_str(&format!(
            "\n{} -> {}\n\n",
            result.candidate_name, result.job_title
        ));
        out.push_str(&self.score_line("Overall Match", scores.overall_score));
        out.push_str(&self.score_line("Skills Match (50% weight)", scores.skills_match));
        out.push_str(&self.score_line("Experience Match (30% weight)", scores.experience_match));
        out.push_str(&self.score_line("Education Match (20% weight)", scores.education_match));

        let method = if result.details.semantic_matching_used {
            "semantic + keyword matching"
        } else {
            "keyword matching only"
        };
        out.push_str(&format!("\nMatching method: {}\n", method));

        if self.detailed {
            let resume = &result.details.parsed_resume;
            let job = &result.details.job_requirements;

            Self::item_list(&mut out, "Skills found:", &resume.skills);
            Self::item_list(&mut out, "Experience found:", &resume.experience);
            Self::item_list(&mut out, "Education found:", &resume.education);
            Self::item_list(&mut out, "Required skills:", &job.required_skills);
            Self::item_list(&mut out, "Required experience:", &job.required_experience);
            Self::item_list(&mut out, "Required education:", &job.required_education);
        }

        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, result: &MatchResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(json)
    }
}

/// Default filename for a saved report.
pub fn default_save_name(format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
    };
    format!(
        "match_report_{}.{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::MatchEngine;

    fn sample_result() -> MatchResult {
        let engine = MatchEngine::new(None).unwrap();
        engine.score(
            "Jane Doe\n\nSkills\nRust, SQL\n\nEducation\nBSc CS",
            "Role: Engineer\nSkills: Rust, Go",
        )
    }

    #[test]
    fn console_report_lists_all_scores() {
        let formatter = ConsoleFormatter::new(false, false);
        let report = formatter.format_report(&sample_result()).unwrap();

        assert!(report.contains("Jane Doe -> Engineer"));
        assert!(report.contains("Overall Match"));
        assert!(report.contains("Skills Match"));
        assert!(report.contains("keyword matching only"));
    }

    #[test]
    fn detailed_console_report_lists_parsed_fields() {
        let formatter = ConsoleFormatter::new(false, true);
        let report = formatter.format_report(&sample_result()).unwrap();

        assert!(report.contains("Skills found:"));
        assert!(report.contains("Rust, SQL"));
        assert!(report.contains("Required skills:"));
    }

    #[test]
    fn json_report_round_trips() {
        let result = sample_result();
        let json = JsonFormatter::new(true).format_report(&result).unwrap();
        let parsed: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn save_name_carries_format_extension() {
        assert!(default_save_name(&OutputFormat::Json).ends_with(".json"));
        assert!(default_save_name(&OutputFormat::Console).ends_with(".txt"));
    }
}
