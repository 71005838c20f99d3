use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use log::{debug, info};
use regex::Regex;

use investai_market_data::QuoteSnapshot;

use super::assistant_model::{ChatMessage, ChatRequest, ChatResponse, ChatSource};
use super::assistant_traits::CompletionClientTrait;
use crate::constants::QUOTE_MAX_AGE_MINUTES;
use crate::errors::{Error, Result};
use crate::quotes::QuoteFetcher;

const MAX_TICKERS: usize = 3;

static TICKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("Invalid regex pattern"));

const SYSTEM_PROMPT: &str = "You are a concise equity research assistant. \
Use only the provided context and cite data sources; do not fabricate tickers or prices. \
Avoid personalized advice and stick to general insights. Mention when data is missing.";

/// Up to three distinct ticker-like tokens, in order of appearance.
pub fn detect_tickers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TICKER_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| seen.insert(*t))
        .take(MAX_TICKERS)
        .map(str::to_string)
        .collect()
}

pub struct AssistantService {
    completion: Option<Arc<dyn CompletionClientTrait>>,
    fetcher: QuoteFetcher,
}

impl AssistantService {
    /// `completion` is `None` when no AI key is configured.
    pub fn new(completion: Option<Arc<dyn CompletionClientTrait>>, fetcher: QuoteFetcher) -> Self {
        Self {
            completion,
            fetcher,
        }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let completion = self
            .completion
            .as_ref()
            .ok_or_else(|| Error::MissingConfigKey("AI_API_KEY".to_string()))?;
        request.validate()?;

        let tickers = detect_tickers(&request.prompt);
        let mut context = Vec::new();
        let mut sources = Vec::new();

        for symbol in &tickers {
            let quote = match self.fetcher.quote(symbol, QUOTE_MAX_AGE_MINUTES).await {
                Ok(payload) => QuoteSnapshot::from_payload(&payload),
                Err(e) => {
                    debug!("No quote context for {}: {}", symbol, e);
                    continue;
                }
            };
            let Ok(quote) = quote else {
                continue;
            };

            context.push(format!(
                "Quote {}: price {}, change {} ({}%), high {}, low {}, prev close {}",
                symbol,
                quote.current,
                fmt_opt(quote.change),
                fmt_opt(quote.percent_change),
                fmt_opt(quote.high),
                fmt_opt(quote.low),
                fmt_opt(quote.previous_close),
            ));
            sources.push(ChatSource {
                kind: "quote".to_string(),
                symbol: Some(symbol.clone()),
                url: Some(format!("https://finnhub.io/quote/{}", symbol)),
            });
        }

        if let Some(url) = request.article_url.as_deref().filter(|u| !u.trim().is_empty()) {
            context.push(format!("User referenced an article (not retrieved): {}", url));
        }

        let messages = vec![
            ChatMessage::system(format!("{}\nContext:\n{}", SYSTEM_PROMPT, context.join("\n"))),
            ChatMessage::user(request.prompt.clone()),
        ];

        let answer = completion.complete(messages).await?;
        info!(
            "Assistant answered with {} context sources for {:?}",
            sources.len(),
            tickers
        );

        Ok(ChatResponse {
            answer,
            sources,
            tickers,
        })
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
