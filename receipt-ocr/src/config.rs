use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read an env var, treating empty values the same as unset ones.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-5-nano";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory receiving uploaded receipts. Created at startup.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

/// OCR provider settings. The invoke URL and secret come from the provider
/// console; both must be present for OCR to run.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub api_url: Option<String>,
    pub secret_key: Option<String>,
    pub timeout_secs: u64,
}

/// Chat-completion settings used to turn OCR text into a receipt summary
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_completion_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", DEFAULT_PORT),
                upload_dir: env_non_empty("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./uploads")),
                max_upload_bytes: parse_env_or("MAX_UPLOAD_SIZE", DEFAULT_MAX_UPLOAD_BYTES),
            },
            ocr: OcrConfig {
                api_url: env_non_empty("NAVER_OCR_API_URL"),
                secret_key: env_non_empty("NAVER_OCR_SECRET_KEY"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
            },
            llm: LlmConfig {
                api_key: env_non_empty("OPENAI_API_KEY"),
                base_url: env_non_empty("LLM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                model: env_non_empty("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                max_completion_tokens: parse_env_or("LLM_MAX_COMPLETION_TOKENS", 5000),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
