//! Command-line interface definitions for News Taster.
//!
//! One subcommand per section of the tool. Global options select the article
//! and where reports go; options given here override the config file.

use crate::api::CompletionMode;
use crate::models::CoStarFields;
use crate::prompt::{
    DEFAULT_AUDIENCE, DEFAULT_CONTEXT, DEFAULT_RESPONSE_FORMAT, STYLE_PRESETS, TONE_PRESETS,
};
use crate::text::StopWordList;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for the News Taster application.
///
/// # Examples
///
/// ```sh
/// # Page source, article text and word cloud
/// news_taster -u https://www.bbc.com/news/articles/xyz analyse
///
/// # Only the highlighted tab, as HTML markup
/// news_taster -u https://www.bbc.com/news/articles/xyz stop-words --tab highlighted --html
///
/// # Ask a question with a CO-STAR prompt
/// news_taster -u https://www.bbc.com/news/articles/xyz ask -q "Who is affected?" --tone Casual
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the news article
    #[arg(short, long)]
    pub url: String,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for JSON and Markdown reports (nothing is written when omitted)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// CSS selector of the element holding the article text
    #[arg(long)]
    pub selector: Option<String>,

    /// Stop-word list to use
    #[arg(long, value_enum)]
    pub stop_words: Option<StopWordList>,

    #[command(subcommand)]
    pub section: Section,
}

#[derive(Subcommand, Debug)]
pub enum Section {
    /// Page source, extracted article text and word cloud
    Analyse {
        /// Show a single tab instead of all of them
        #[arg(long, value_enum)]
        tab: Option<AnalyseTab>,
    },
    /// Original text, stop words highlighted, stop words removed and word cloud
    StopWords {
        /// Show a single tab instead of all of them
        #[arg(long, value_enum)]
        tab: Option<StopWordsTab>,

        /// Print the highlighted tab as `<mark>` HTML markup
        #[arg(long)]
        html: bool,
    },
    /// Ask a language model about the article using a CO-STAR prompt
    Ask(AskArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyseTab {
    Html,
    Text,
    Cloud,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWordsTab {
    Original,
    Highlighted,
    Removed,
    Cloud,
}

/// CO-STAR fields and completion API overrides.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer from the article (Objective)
    #[arg(short = 'q', long)]
    pub objective: String,

    /// Who is asking and why (Context)
    #[arg(long, default_value = DEFAULT_CONTEXT)]
    pub context: String,

    /// Writing style, e.g. Political Analyst, Economics Consultant, Social Worker, Teacher, Singaporean Uncle
    #[arg(long, default_value = STYLE_PRESETS[0])]
    pub style: String,

    /// Tone, e.g. Formal, Casual, Humorous, Empathetic, Authoritative, Inspirational, Nonchalant
    #[arg(long, default_value = TONE_PRESETS[0])]
    pub tone: String,

    /// Who the answer is for (Audience)
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    pub audience: String,

    /// Desired response format (Response)
    #[arg(long, default_value = DEFAULT_RESPONSE_FORMAT)]
    pub response_format: String,

    /// API key for the completion API
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Which endpoint to call
    #[arg(long, value_enum)]
    pub mode: Option<CompletionMode>,

    /// Print the assembled prompt without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

impl AskArgs {
    pub fn fields(&self) -> CoStarFields {
        CoStarFields {
            context: self.context.clone(),
            objective: self.objective.clone(),
            style: self.style.clone(),
            tone: self.tone.clone(),
            audience: self.audience.clone(),
            response_format: self.response_format.clone(),
        }
    }
}
