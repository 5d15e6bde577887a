//! Maps a recommendation request onto the recommender and back.
//!
//! Nothing here touches HTTP; the REST layer turns an [`Outcome`] into a
//! status code and JSON body.

use prodsim_core::{Recommendation, ServiceState};
use serde::Deserialize;

/// Results per request when the form carries no count.
pub const DEFAULT_REQUEST_COUNT: usize = 5;
/// Upper bound on a requested count.
pub const DEFAULT_MAX_COUNT: usize = 50;

pub const MISSING_INPUT_MESSAGE: &str = "Please enter a product name.";
pub const NOT_FOUND_MESSAGE: &str = "Product not found. Please try another name.";

/// Fields accepted from a form body or query string.
///
/// `count` stays textual so a bad value becomes an [`Outcome::InvalidCount`]
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendForm {
    pub product_name: Option<String>,
    pub count: Option<String>,
}

impl RecommendForm {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: Some(product_name.into()),
            count: None,
        }
    }

    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_REQUEST_COUNT,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    /// No product name, or only whitespace.
    MissingInput,
    /// Startup loading failed; nothing can be recommended.
    Unavailable { reason: &'a str },
    /// `count` was present but not a positive integer.
    InvalidCount { query: String, count: String },
    /// The name is not in the catalog, or nothing else is.
    NotFound { query: String },
    Found {
        query: String,
        recommendations: Vec<Recommendation<'a>>,
    },
}

pub fn handle<'a>(state: &'a ServiceState, form: &RecommendForm, config: &HandlerConfig) -> Outcome<'a> {
    let query = match form.product_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Outcome::MissingInput,
    };

    let recommender = match state {
        ServiceState::Ready(recommender) => recommender,
        ServiceState::NotReady { reason } => {
            return Outcome::Unavailable {
                reason: reason.as_str(),
            }
        }
    };

    let count = match parse_count(form.count.as_deref(), config) {
        Some(count) => count,
        None => {
            return Outcome::InvalidCount {
                query: query.to_string(),
                count: form.count.clone().unwrap_or_default(),
            }
        }
    };

    let recommendations = recommender.rank(query, count);
    if recommendations.is_empty() {
        Outcome::NotFound {
            query: query.to_string(),
        }
    } else {
        Outcome::Found {
            query: query.to_string(),
            recommendations,
        }
    }
}

/// Absent or blank means the default; otherwise a positive integer.
/// Either way the result lies in `1..=max_count`, whatever the config holds.
fn parse_count(raw: Option<&str>, config: &HandlerConfig) -> Option<usize> {
    let max = config.max_count.max(1);
    let raw = match raw.map(str::trim) {
        None | Some("") => return Some(config.default_count.clamp(1, max)),
        Some(raw) => raw,
    };
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n.min(max)),
    }
}
