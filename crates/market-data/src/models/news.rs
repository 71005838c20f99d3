use serde::{Deserialize, Serialize};

/// Market news article as served by `/news`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    /// Unix timestamp of publication
    #[serde(default)]
    pub datetime: Option<i64>,
    pub headline: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub related: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub url: String,
}
