pub mod handler;
pub mod rest;

pub use handler::{handle, HandlerConfig, Outcome, RecommendForm, DEFAULT_MAX_COUNT, DEFAULT_REQUEST_COUNT};
pub use rest::{AppState, RestApi, RestConfig};
