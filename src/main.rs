//! # News Taster
//!
//! Fetches a single news article and lets you taste its text: the page
//! source, the extracted article text, the words left once stop words are
//! removed, a word cloud of what remains, and answers from a language model
//! prompted with the CO-STAR framework.
//!
//! ## Usage
//!
//! ```sh
//! news_taster -u https://www.bbc.com/news/articles/xyz analyse
//! news_taster -u https://www.bbc.com/news/articles/xyz -o ./reports stop-words
//! news_taster -u https://www.bbc.com/news/articles/xyz ask -q "Who is affected?"
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: download the page and extract the article container's text
//! 2. **Text pipeline**: normalize once, then derive the highlight, filtered
//!    and frequency views from the same token sequence
//! 3. **Sections**: print the tabs of the chosen section, or assemble a
//!    CO-STAR prompt and ask the completion API
//! 4. **Output**: optionally write JSON and Markdown reports plus an index

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod prompt;
mod scrapers;
mod text;
mod utils;

use api::{CompletionClient, ask_with_backoff};
use cli::{AnalyseTab, AskArgs, Cli, Section, StopWordsTab};
use config::{Config, load_config};
use models::{AnswerRecord, Session, SessionReport};
use outputs::cloud::{JsonCloudRenderer, WordCloudRenderer};
use outputs::html::highlight_markup;
use outputs::{indexes, json, markdown, terminal};
use text::{Frequency, TextPipeline, TextViews};
use utils::{ensure_writable_dir, slugify_url};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_taster starting up");

    let args = Cli::parse();
    debug!(url = %args.url, ?args.config, ?args.output_dir, "Parsed CLI arguments");

    let mut config = match load_config(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    apply_overrides(&mut config, &args);
    debug!(?config, "Effective configuration");

    // Early check: fail before fetching anything if reports cannot be written
    if let Some(output_dir) = &args.output_dir {
        if let Err(e) = ensure_writable_dir(output_dir).await {
            error!(
                path = %output_dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch ----
    let http = scrapers::build_client(&config.fetch)?;
    let article = match scrapers::fetch_article(&http, &args.url, &config.fetch.selector).await {
        Ok(article) => article,
        Err(e) => {
            error!(url = %args.url, error = %e, "Could not fetch article; nothing to analyse");
            return Err(e.into());
        }
    };
    let session = Session::new(article);

    // ---- Text pipeline: one pass feeds every view ----
    let stop_words = config.stop_words();
    let pipeline = TextPipeline::new(config.normalizer(), &stop_words);
    debug!(
        min_len = pipeline.normalizer().min_len(),
        max_len = pipeline.normalizer().max_len(),
        stop_words = pipeline.stop_words().len(),
        "Text pipeline ready"
    );
    let views = pipeline.run(session.text());
    if views.is_empty() {
        warn!(url = %session.article.url, "Article text produced no tokens");
    }
    info!(
        tokens = views.token_count(),
        stop_words = views.stop_word_count(),
        distinct = views.frequency().len(),
        "Text pipeline complete"
    );

    // ---- Section ----
    match &args.section {
        Section::Analyse { tab } => {
            // This section's cloud is drawn from every token, stop words included
            let all_words = views.token_frequency();
            show_analyse(&session, &all_words, *tab);
            if let Some(output_dir) = &args.output_dir {
                write_session_outputs(output_dir, &session, &views, &all_words, &config).await?;
            }
        }
        Section::StopWords { tab, html } => {
            show_stop_words(&session, &views, *tab, *html);
            if let Some(output_dir) = &args.output_dir {
                write_session_outputs(output_dir, &session, &views, views.frequency(), &config)
                    .await?;
            }
        }
        Section::Ask(ask) => {
            run_ask(&session, ask, &config, http, args.output_dir.as_deref()).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &Cli) {
    if let Some(selector) = &args.selector {
        config.fetch.selector = selector.clone();
    }
    if let Some(list) = args.stop_words {
        config.text.stop_word_list = list;
    }
    if let Section::Ask(ask) = &args.section {
        if let Some(base_url) = &ask.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(model) = &ask.model {
            config.api.model = model.clone();
        }
        if let Some(mode) = ask.mode {
            config.api.mode = mode;
        }
    }
}

fn show_analyse(session: &Session, all_words: &Frequency, tab: Option<AnalyseTab>) {
    let show = |t: AnalyseTab| tab.is_none_or(|only| only == t);
    if show(AnalyseTab::Html) {
        terminal::display_html_source(&session.article.html);
    }
    if show(AnalyseTab::Text) {
        terminal::display_article_text(session.text());
    }
    if show(AnalyseTab::Cloud) {
        terminal::display_word_cloud(all_words);
    }
}

fn show_stop_words(session: &Session, views: &TextViews, tab: Option<StopWordsTab>, html: bool) {
    let show = |t: StopWordsTab| tab.is_none_or(|only| only == t);
    if show(StopWordsTab::Original) {
        terminal::display_article_text(session.text());
    }
    if show(StopWordsTab::Highlighted) {
        if html {
            terminal::display_tab("Stop Words Highlighted");
            println!("{}", highlight_markup(views.highlight()));
        } else {
            terminal::display_highlighted(views);
        }
    }
    if show(StopWordsTab::Removed) {
        terminal::display_removed(views);
    }
    if show(StopWordsTab::Cloud) {
        terminal::display_word_cloud(views.frequency());
    }
}

#[instrument(level = "info", skip_all, fields(url = %session.article.url))]
async fn run_ask(
    session: &Session,
    ask: &AskArgs,
    config: &Config,
    http: reqwest::Client,
    output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let fields = ask.fields();
    let prompt = prompt::assemble(&fields, session.text());
    debug!(prompt_bytes = prompt.len(), "Assembled CO-STAR prompt");

    if ask.dry_run {
        terminal::display_prompt(&prompt);
        return Ok(());
    }

    let client = match CompletionClient::from_config(http, &config.api, ask.api_key.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Cannot build completion client");
            return Err(e.into());
        }
    };

    let answer = match ask_with_backoff(client, &prompt, &config.api).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(error = %e, "Completion API call failed");
            return Err(e.into());
        }
    };
    terminal::display_answer(&answer);

    if let Some(output_dir) = output_dir {
        let record = AnswerRecord {
            url: session.article.url.clone(),
            asked_at: chrono::Utc::now(),
            model: config.api.model.clone(),
            fields,
            answer,
        };
        let local_date = record
            .asked_at
            .with_timezone(&chrono::Local)
            .date_naive()
            .to_string();
        let dir = json::date_dir(output_dir, &local_date).await?;
        let path = dir.join(format!("{}.answer.json", slugify_url(&record.url)));
        if let Err(e) = json::write_json(&record, &path).await {
            error!(path = %path.display(), error = %e, "Failed to write answer JSON");
        }
    }

    Ok(())
}

/// Write the session report, word-cloud input and Markdown, then index them.
#[instrument(level = "info", skip_all, fields(%output_dir))]
async fn write_session_outputs(
    output_dir: &str,
    session: &Session,
    views: &TextViews,
    cloud_words: &Frequency,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let report = SessionReport::new(session, views, config.cloud.max_words);
    let dir = json::date_dir(output_dir, &report.local_date).await?;
    let slug = slugify_url(&report.url);

    if let Err(e) = json::write_json(&report, &dir.join(format!("{slug}.json"))).await {
        error!(error = %e, "Failed to write session report");
    }

    let cloud = JsonCloudRenderer::from(&config.cloud).render(cloud_words);
    if let Err(e) = json::write_json(&cloud, &dir.join(format!("{slug}.cloud.json"))).await {
        error!(error = %e, "Failed to write word-cloud JSON");
    }

    let markdown_filename = format!("{slug}.md");
    let md_path = dir.join(&markdown_filename);
    let md = markdown::session_to_markdown(session, views, &report);
    if let Err(e) = tokio::fs::write(&md_path, md).await {
        error!(path = %md_path.display(), error = %e, "Failed writing Markdown");
        return Err(e.into());
    }
    info!(path = %md_path.display(), "Wrote session Markdown");

    if let Err(e) = indexes::update_session_index(output_dir, &report, &markdown_filename).await {
        error!(error = %e, "Failed to update index.md");
    }

    Ok(())
}
