/// Symbols shown on the market overview.
pub const OVERVIEW_SYMBOLS: [&str; 5] = ["NVDA", "AMD", "MSFT", "TSLA", "JPM"];

/// Symbols covered by the insights view.
pub const INSIGHT_SYMBOLS: [&str; 3] = ["NVDA", "MSFT", "TSLA"];

/// Cache horizon for plain quotes.
pub const QUOTE_MAX_AGE_MINUTES: i64 = 1;

/// Cache horizon for daily candles.
pub const HISTORY_MAX_AGE_MINUTES: i64 = 30;

/// Cache horizon for insight quotes.
pub const INSIGHT_MAX_AGE_MINUTES: i64 = 10;

/// Cache horizon for news feeds.
pub const NEWS_MAX_AGE_MINUTES: i64 = 30;

/// Days of daily candles served by the history view.
pub const HISTORY_DAYS: i64 = 30;

/// Articles returned by the news view.
pub const NEWS_LIMIT: usize = 10;

pub const DEFAULT_NEWS_CATEGORY: &str = "general";
