//! Word-cloud rendering.
//!
//! Layout, colors and rasterization belong to whatever draws the cloud. This
//! module only turns a frequency view into something such a renderer can
//! consume: a weighted word list ([`JsonCloudRenderer`]) or a quick bar chart
//! for the terminal ([`TerminalCloudRenderer`]).

use crate::config::CloudConfig;
use crate::models::{WeightedWord, weighted};
use crate::text::Frequency;
use crate::text::pipeline::rank;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

/// Anything that can render a frequency view.
pub trait WordCloudRenderer {
    type Output;

    fn render(&self, frequency: &Frequency) -> Self::Output;
}

/// Input for an external word-cloud renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCloudSpec {
    pub width: u32,
    pub height: u32,
    pub words: Vec<WeightedWord>,
}

/// Renders the most frequent words, with canvas size hints, as a [`WordCloudSpec`].
#[derive(Debug, Clone)]
pub struct JsonCloudRenderer {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
}

impl From<&CloudConfig> for JsonCloudRenderer {
    fn from(config: &CloudConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            max_words: config.max_words,
        }
    }
}

impl WordCloudRenderer for JsonCloudRenderer {
    type Output = WordCloudSpec;

    fn render(&self, frequency: &Frequency) -> WordCloudSpec {
        WordCloudSpec {
            width: self.width,
            height: self.height,
            words: weighted(rank(frequency, self.max_words)),
        }
    }
}

/// Renders the top words as a horizontal bar chart.
#[derive(Debug, Clone)]
pub struct TerminalCloudRenderer {
    pub max_words: usize,
    pub bar_width: usize,
}

impl Default for TerminalCloudRenderer {
    fn default() -> Self {
        Self {
            max_words: 20,
            bar_width: 40,
        }
    }
}

impl WordCloudRenderer for TerminalCloudRenderer {
    type Output = String;

    fn render(&self, frequency: &Frequency) -> String {
        let ranked = rank(frequency, self.max_words);
        let Some(&(_, top)) = ranked.first() else {
            return String::new();
        };
        let label_width = ranked
            .iter()
            .map(|(t, _)| t.as_str().chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for (token, count) in &ranked {
            let len = (count * self.bar_width).div_ceil(top).max(1);
            let pad = label_width - token.as_str().chars().count();
            writeln!(
                out,
                "  {}{} {} {}",
                token.as_str().bold(),
                " ".repeat(pad),
                "█".repeat(len).cyan(),
                count
            )
            .unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleText;
    use crate::text::{Normalizer, StopWordSet, TextPipeline};

    fn frequency(text: &str) -> Frequency {
        let stop_words = StopWordSet::nltk_english();
        TextPipeline::new(Normalizer::default(), &stop_words)
            .run(&ArticleText::new(text))
            .frequency()
            .clone()
    }

    #[test]
    fn test_json_cloud() {
        let renderer = JsonCloudRenderer::from(&CloudConfig::default());
        let spec = renderer.render(&frequency("storm storm storm coast coast the rain"));
        assert_eq!(spec.width, 800);
        assert_eq!(spec.height, 400);
        let words: Vec<(&str, usize)> =
            spec.words.iter().map(|w| (w.text.as_str(), w.weight)).collect();
        assert_eq!(words, vec![("storm", 3), ("coast", 2), ("rain", 1)]);
    }

    #[test]
    fn test_json_cloud_limits_words() {
        let renderer = JsonCloudRenderer {
            width: 10,
            height: 10,
            max_words: 1,
        };
        let spec = renderer.render(&frequency("alpha beta beta"));
        assert_eq!(spec.words.len(), 1);
        assert_eq!(spec.words[0].text, "beta");
    }

    #[test]
    fn test_json_cloud_serialization() {
        let renderer = JsonCloudRenderer::from(&CloudConfig::default());
        let json = serde_json::to_string(&renderer.render(&frequency("news"))).unwrap();
        assert_eq!(
            json,
            r#"{"width":800,"height":400,"words":[{"text":"news","weight":1}]}"#
        );
    }

    #[test]
    fn test_terminal_cloud() {
        colored::control::set_override(false);
        let renderer = TerminalCloudRenderer {
            max_words: 5,
            bar_width: 4,
        };
        let out = renderer.render(&frequency("storm storm storm storm coast"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["  storm ████ 4", "  coast █ 1"]);
    }

    #[test]
    fn test_empty_clouds() {
        let empty = Frequency::new();
        assert!(TerminalCloudRenderer::default().render(&empty).is_empty());
        assert!(JsonCloudRenderer::from(&CloudConfig::default())
            .render(&empty)
            .words
            .is_empty());
    }
}
