use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_timeout_secs: u64,
    /// Cloud tier is only registered when a key is present.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3"),
            ollama_timeout_secs: parse_env("OLLAMA_TIMEOUT_SECS", 25)?,
            gemini_api_key: non_blank(std::env::var("GEMINI_API_KEY").ok()),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 30)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Treats a blank value the same as an unset one.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // Tests run in parallel; each one owns its variable.

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        std::env::remove_var("INTERVIEW_TEST_UNSET_SECS");
        assert_eq!(parse_env("INTERVIEW_TEST_UNSET_SECS", 25u64).unwrap(), 25);
    }

    #[test]
    fn test_parse_env_reads_trimmed_value() {
        std::env::set_var("INTERVIEW_TEST_PORT", " 9090 ");
        assert_eq!(parse_env("INTERVIEW_TEST_PORT", 8080u16).unwrap(), 9090);
    }

    #[test]
    fn test_parse_env_error_names_the_variable() {
        std::env::set_var("INTERVIEW_TEST_BAD_SECS", "soon");
        let err = parse_env("INTERVIEW_TEST_BAD_SECS", 30u64).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("INTERVIEW_TEST_BAD_SECS"));
        assert!(message.contains("soon"));
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some("abc".to_string())).as_deref(), Some("abc"));
    }
}
