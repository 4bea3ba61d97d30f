//! Completion API interaction with exponential backoff retry logic.
//!
//! The assembled prompt is sent unchanged to an OpenAI-compatible API and
//! the answer comes back as opaque text.
//!
//! # Architecture
//!
//! - [`AskAsync`]: core trait defining async LLM interaction
//! - [`CompletionClient`]: `reqwest` client for `/completions` or `/chat/completions`
//! - [`RetryAsk`]: decorator that adds retry logic to any `AskAsync` implementation
//!
//! # Retry Strategy
//!
//! - Maximum 5 retry attempts (configurable)
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//! - Only transport errors, HTTP 429 and 5xx are retried

use crate::config::ApiConfig;
use crate::error::CompletionError;
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Trait for async LLM interaction.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, CompletionError>;
}

/// Which OpenAI-compatible endpoint to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    /// `POST /chat/completions` with the prompt as a single user message.
    #[default]
    Chat,
    /// Legacy `POST /completions` with the prompt as-is.
    Completions,
}

impl CompletionMode {
    fn path(self) -> &'static str {
        match self {
            CompletionMode::Chat => "chat/completions",
            CompletionMode::Completions => "completions",
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`AskAsync`] implementation.
///
/// # Backoff Strategy
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..max_jitter)
/// ```
pub struct RetryAsk<T> {
    /// The underlying LLM client to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
    /// Upper bound of the random jitter added to each delay.
    max_jitter: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    /// Create a new retry wrapper around an existing [`AskAsync`] implementation.
    ///
    /// ```ignore
    /// let retry_client = RetryAsk::new(client, 5, Duration::from_secs(1));
    /// ```
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
            max_jitter: StdDuration::from_millis(250),
        }
    }

    pub fn with_max_jitter(mut self, max_jitter: StdDuration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    fn delay_for(&self, attempt: usize) -> StdDuration {
        let shift = (attempt - 1).min(31) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=self.max_jitter.as_millis() as u64);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("max_jitter", &self.max_jitter)
            .finish()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, CompletionError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.ask(text).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if !e.is_retryable() {
                        error!(attempt, error = %e, "ask() failed with a non-retryable error");
                        return Err(e);
                    }

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis(),
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "ask() exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis(),
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "ask() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Client for an OpenAI-compatible completion API.
pub struct CompletionClient {
    http: Client,
    base_url: String,
    model: String,
    mode: CompletionMode,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl CompletionClient {
    /// Build a client from the `api` config section.
    ///
    /// `api_key` (from the command line or `OPENAI_API_KEY`) takes
    /// precedence over the key in the config file.
    pub fn from_config(
        http: Client,
        api: &ApiConfig,
        api_key: Option<String>,
    ) -> Result<Self, CompletionError> {
        let api_key = api_key
            .or_else(|| api.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or(CompletionError::MissingApiKey)?;
        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            model: api.model.clone(),
            mode: api.mode,
            max_tokens: api.max_tokens,
            temperature: api.temperature,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.mode.path())
    }

    fn body<'a>(&'a self, prompt: &'a str) -> RequestBody<'a> {
        match self.mode {
            CompletionMode::Chat => RequestBody::Chat(ChatRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            }),
            CompletionMode::Completions => RequestBody::Completions(CompletionRequest {
                model: &self.model,
                prompt,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            }),
        }
    }
}

impl AskAsync for CompletionClient {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(model = %self.model, mode = ?self.mode))]
    async fn ask(&self, text: &str) -> Result<Self::Response, CompletionError> {
        let t0 = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.body(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(
                elapsed_ms = dt.as_millis(),
                %status,
                body = %truncate_for_log(&body, 300),
                "API call failed"
            );
            return Err(CompletionError::Status { status, body });
        }

        debug!(elapsed_ms = dt.as_millis(), bytes = body.len(), "API call succeeded");
        parse_answer(self.mode, &body)
    }
}

/// Pull the answer text out of a successful response body.
pub fn parse_answer(mode: CompletionMode, body: &str) -> Result<String, CompletionError> {
    let answer = match mode {
        CompletionMode::Chat => {
            let parsed: ChatResponse = serde_json::from_str(body)?;
            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
        }
        CompletionMode::Completions => {
            let parsed: CompletionResponse = serde_json::from_str(body)?;
            parsed.choices.into_iter().next().map(|c| c.text)
        }
    };
    answer
        .map(|a| a.trim().to_string())
        .ok_or(CompletionError::EmptyResponse)
}

/// Send `prompt` to the completion API with exponential backoff.
#[instrument(level = "info", skip_all, fields(prompt_bytes = prompt.len()))]
pub async fn ask_with_backoff(
    client: CompletionClient,
    prompt: &str,
    api: &ApiConfig,
) -> Result<String, CompletionError> {
    let t0 = Instant::now();
    let retrying = RetryAsk::new(
        client,
        api.max_retries,
        StdDuration::from_millis(api.base_delay_ms),
    );
    let res = retrying.ask(prompt).await;
    let dt = t0.elapsed();

    match &res {
        Ok(_) => info!(elapsed_ms_total = dt.as_millis(), "ask_with_backoff succeeded"),
        Err(e) => {
            error!(elapsed_ms_total = dt.as_millis(), error = %e, "ask_with_backoff failed")
        }
    }
    res
}

// --- OpenAI-compatible request/response types ---

#[derive(Serialize)]
#[serde(untagged)]
enum RequestBody<'a> {
    Chat(ChatRequest<'a>),
    Completions(CompletionRequest<'a>),
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
