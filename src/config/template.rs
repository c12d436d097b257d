//! Configuration template generation

use crate::config::Config;
use crate::utils::error::{Error, Result};
use std::fs;
use std::path::Path;

const COMMENTED_TEMPLATE: &str = r#"# fxpulse configuration
# All keys are optional except `version`; omitted keys take the values shown here.

version = "0.1.0"

[app]
# Log level (trace, debug, info, warn, error); FXPULSE_LOG overrides it
log_level = "info"

[feed]
# RSS feed with the latest forex headlines (env: FXPULSE_FEED_URL)
url = "https://www.forexlive.com/feed/news/"

# Pass-through proxy; the encoded feed URL is appended to this prefix
# proxy = "https://api.allorigins.win/raw?url="

# Seconds between two feed refreshes
refresh_interval_secs = 300

# HTTP timeout for the feed request in seconds
timeout_secs = 15

[assistant]
# API key for the chat completion service (env: OPENAI_API_KEY)
# api_key = ""

# Model used to answer questions and analyse articles (env: FXPULSE_MODEL)
# One of gpt-4-turbo-preview, gpt-4, gpt-3.5-turbo for cost estimates
model = "gpt-4-turbo-preview"

# Model used to propose follow-up questions
suggestion_model = "gpt-3.5-turbo"

# OpenAI-compatible API root
base_url = "https://api.openai.com/v1"

# Sampling temperature (0-2) and answer length limit
temperature = 0.7
max_tokens = 500

# HTTP timeout in seconds
timeout_secs = 60

# Analysis instructions and persona; uncomment to override the built-in text
# prompt = "Analyse this forex market news and give a detailed analysis ..."
# context = "You are a forex market analyst with more than 20 years of experience ..."

[dashboard]
# Address the web dashboard listens on (env: FXPULSE_BIND)
bind_addr = "127.0.0.1:8080"
"#;

/// Generate a default configuration file at the specified path
pub fn generate_config_template<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = Config::default();
    config
        .save(path)
        .map_err(|e| Error::ConfigError(e.to_string()))
}

/// Generate a configuration file with comments explaining each field
pub fn generate_commented_config_template<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, COMMENTED_TEMPLATE)?;
    Ok(())
}
