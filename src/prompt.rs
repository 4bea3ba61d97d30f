//! CO-STAR prompt assembly.
//!
//! CO-STAR (Context, Objective, Style, Tone, Audience, Response format) is a
//! fixed six-section prompt layout. The fields are interpolated as plain
//! text: nothing is validated or escaped. The article text follows under a
//! `# TEXT #` heading.

use crate::models::{ArticleText, CoStarFields};

pub const DEFAULT_CONTEXT: &str = "I am a student learning about data science.";
pub const DEFAULT_AUDIENCE: &str = "Student";
pub const DEFAULT_RESPONSE_FORMAT: &str = "A brief answer to the question in the Objective.";

/// Suggested writing styles.
pub const STYLE_PRESETS: &[&str] = &[
    "Political Analyst",
    "Economics Consultant",
    "Social Worker",
    "Teacher",
    "Singaporean Uncle",
];

/// Suggested tones.
pub const TONE_PRESETS: &[&str] = &[
    "Formal",
    "Casual",
    "Humorous",
    "Empathetic",
    "Authoritative",
    "Inspirational",
    "Nonchalant",
];

/// Build the prompt for `fields` around `article`.
pub fn assemble(fields: &CoStarFields, article: &ArticleText) -> String {
    format!(
        r#"# CONTEXT #
{context}

# OBJECTIVE #
Answer the following question based on the provided text.
If the answer cannot be found in the text, say "I don't have enough information to answer that."
Question: {objective}

# STYLE #
{style}

# TONE #
{tone}

# AUDIENCE #
{audience}

# RESPONSE #
{response_format}

# TEXT #
{text}
"#,
        context = fields.context,
        objective = fields.objective,
        style = fields.style,
        tone = fields.tone,
        audience = fields.audience,
        response_format = fields.response_format,
        text = article,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> CoStarFields {
        CoStarFields {
            context: DEFAULT_CONTEXT.to_string(),
            objective: "What happened?".to_string(),
            style: STYLE_PRESETS[3].to_string(),
            tone: TONE_PRESETS[0].to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            response_format: DEFAULT_RESPONSE_FORMAT.to_string(),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = assemble(&fields(), &ArticleText::new("Body."));
        let headings = [
            "# CONTEXT #",
            "# OBJECTIVE #",
            "# STYLE #",
            "# TONE #",
            "# AUDIENCE #",
            "# RESPONSE #",
            "# TEXT #",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| prompt.find(h).unwrap_or_else(|| panic!("missing {h}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fields_interpolated() {
        let prompt = assemble(&fields(), &ArticleText::new("The article body."));
        assert!(prompt.starts_with("# CONTEXT #\nI am a student learning about data science.\n"));
        assert!(prompt.contains("Question: What happened?\n"));
        assert!(prompt.contains("# STYLE #\nTeacher\n"));
        assert!(prompt.contains("# TONE #\nFormal\n"));
        assert!(prompt.contains("# AUDIENCE #\nStudent\n"));
        assert!(prompt.contains("# RESPONSE #\nA brief answer to the question in the Objective.\n"));
        assert!(prompt.ends_with("# TEXT #\nThe article body.\n"));
    }

    #[test]
    fn test_no_escaping() {
        let mut f = fields();
        f.objective = "Is {this} <b>\"quoted\"</b>?".to_string();
        let prompt = assemble(&f, &ArticleText::new("# TEXT # inside"));
        assert!(prompt.contains("Question: Is {this} <b>\"quoted\"</b>?"));
        assert!(prompt.ends_with("# TEXT # inside\n"));
    }

    #[test]
    fn test_empty_fields_kept() {
        let f = CoStarFields {
            context: String::new(),
            objective: String::new(),
            style: String::new(),
            tone: String::new(),
            audience: String::new(),
            response_format: String::new(),
        };
        let prompt = assemble(&f, &ArticleText::new(""));
        assert!(prompt.starts_with("# CONTEXT #\n\n\n# OBJECTIVE #"));
        assert!(prompt.ends_with("# TEXT #\n\n"));
    }
}
