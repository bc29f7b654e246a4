use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub pipeline: PipelineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let input_path = env::var("CONTACTS_INPUT_PATH").unwrap_or_else(|_| "contacts.csv".to_string());
        let first_names_path =
            env::var("CONTACTS_FIRST_NAMES_PATH").unwrap_or_else(|_| "Prenoms.csv".to_string());
        let output_path = env::var("CONTACTS_OUTPUT_PATH")
            .unwrap_or_else(|_| "Contacts_Cleaned.csv".to_string());

        let input_delimiter = delimiter_from_env("CONTACTS_INPUT_DELIMITER", b',')?;
        let output_delimiter = delimiter_from_env("CONTACTS_OUTPUT_DELIMITER", b';')?;

        let input_encoding = encoding_from_env("CONTACTS_INPUT_ENCODING", TextEncoding::Utf8)?;
        let first_names_encoding =
            encoding_from_env("CONTACTS_FIRST_NAMES_ENCODING", TextEncoding::Latin1)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            pipeline: PipelineConfig {
                input_path: PathBuf::from(input_path),
                first_names_path: PathBuf::from(first_names_path),
                output_path: PathBuf::from(output_path),
                input_delimiter,
                output_delimiter,
                input_encoding,
                first_names_encoding,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// File locations and CSV dialects for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub first_names_path: PathBuf,
    pub output_path: PathBuf,
    pub input_delimiter: u8,
    pub output_delimiter: u8,
    pub input_encoding: TextEncoding,
    pub first_names_encoding: TextEncoding,
}

/// Character encoding of an input CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1,
    Utf8,
}

impl TextEncoding {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Some(Self::Latin1),
            "utf8" | "utf-8" => Some(Self::Utf8),
            _ => None,
        }
    }

    /// Decodes raw field bytes. Latin-1 maps every byte to the code point of the same value.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Latin1 => bytes.iter().map(|&byte| char::from(byte)).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Parses a single-byte CSV delimiter such as `;` or `,`.
pub fn parse_delimiter(value: &str) -> Option<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Some(*byte),
        _ if value == "\\t" => Some(b'\t'),
        _ => None,
    }
}

fn encoding_from_env(var: &'static str, default: TextEncoding) -> Result<TextEncoding, ConfigError> {
    match env::var(var) {
        Ok(value) => TextEncoding::parse(&value).ok_or(ConfigError::InvalidEncoding { var, value }),
        Err(_) => Ok(default),
    }
}

fn delimiter_from_env(var: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_delimiter(&value).ok_or(ConfigError::InvalidDelimiter { var, value }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDelimiter { var: &'static str, value: String },
    InvalidEncoding { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDelimiter { var, value } => {
                write!(f, "{var} must be a single ASCII character, got '{value}'")
            }
            ConfigError::InvalidEncoding { var, value } => {
                write!(f, "{var} must be 'latin1' or 'utf8', got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("CONTACTS_INPUT_PATH");
        env::remove_var("CONTACTS_FIRST_NAMES_PATH");
        env::remove_var("CONTACTS_OUTPUT_PATH");
        env::remove_var("CONTACTS_INPUT_DELIMITER");
        env::remove_var("CONTACTS_OUTPUT_DELIMITER");
        env::remove_var("CONTACTS_INPUT_ENCODING");
        env::remove_var("CONTACTS_FIRST_NAMES_ENCODING");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.pipeline.input_path, PathBuf::from("contacts.csv"));
        assert_eq!(config.pipeline.first_names_path, PathBuf::from("Prenoms.csv"));
        assert_eq!(
            config.pipeline.output_path,
            PathBuf::from("Contacts_Cleaned.csv")
        );
        assert_eq!(config.pipeline.input_delimiter, b',');
        assert_eq!(config.pipeline.output_delimiter, b';');
        assert_eq!(config.pipeline.input_encoding, TextEncoding::Utf8);
        assert_eq!(config.pipeline.first_names_encoding, TextEncoding::Latin1);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CONTACTS_INPUT_DELIMITER", ";;");
        let error = AppConfig::load().expect_err("delimiter rejected");
        reset_env();
        assert!(matches!(
            error,
            ConfigError::InvalidDelimiter {
                var: "CONTACTS_INPUT_DELIMITER",
                ..
            }
        ));
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("CONTACTS_INPUT_DELIMITER", "\\t");
        env::set_var("CONTACTS_INPUT_ENCODING", "latin-1");
        env::set_var("CONTACTS_FIRST_NAMES_ENCODING", "UTF-8");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.pipeline.input_delimiter, b'\t');
        assert_eq!(config.pipeline.input_encoding, TextEncoding::Latin1);
        assert_eq!(config.pipeline.first_names_encoding, TextEncoding::Utf8);
    }

    #[test]
    fn latin1_decoding_maps_bytes_to_code_points() {
        assert_eq!(TextEncoding::Latin1.decode(b"H\xe9l\xe8ne"), "Hélène");
        assert_eq!(TextEncoding::Utf8.decode("Hélène".as_bytes()), "Hélène");
    }
}
