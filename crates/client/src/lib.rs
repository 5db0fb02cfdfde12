#![forbid(unsafe_code)]

//! Client for the board API: a pure state machine (`state`), a pure screen
//! projection (`render`), a blocking HTTP transport (`transport`) and the
//! terminal front end tying them together (`shell`).

pub mod render;
pub mod shell;
pub mod state;
pub mod transport;


pub use render::{Panel, Screen, escape_html, render};
pub use state::{Command, FormField, Mode, PostForm, UiEvent, UiState, update};
pub use transport::{ApiClient, ClientError, DEFAULT_API};

/// API base URL from `BB_API`, or the local default.
pub fn api_base_from_env() -> String {
    api_base_from_lookup(|key| std::env::var(key).ok())
}

pub fn api_base_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("BB_API")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API.to_string())
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
