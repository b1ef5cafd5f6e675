//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `STOCKBOT_*` environment variables (a `.env` file is
//! loaded first by the binary) or the matching command-line flags. Every
//! field is optional at the loading layer; [`AssistantSettings::resolve`]
//! applies defaults and rejects missing or blank required values.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    DEFAULT_EXPORT_PHRASE, DEFAULT_IMAGE_TRIGGER, DEFAULT_MAX_TOKENS, DEFAULT_STORAGE_TIMEOUT,
};
use crate::outbound::generative::{GenerativeFlavor, UnknownFlavor};
use crate::outbound::telegram::DEFAULT_API_BASE;

const DEFAULT_GENERATIVE_ENDPOINT: &str = "https://api.cohere.ai/v1/generate";
const DEFAULT_GENERATIVE_MODEL: &str = "command-xlarge-nightly";
const DEFAULT_GENERATIVE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LANE_IDLE_SECS: u64 = 300;
const DEFAULT_REPORT_DIR: &str = "reports";
const DEFAULT_IMAGE_PATH: &str = "assets/sorpresa.png";

/// Raw configuration as loaded from the environment and CLI.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOCKBOT")]
pub struct AssistantSettings {
    /// Bot API token. Required.
    pub telegram_bot_token: Option<String>,
    /// Bot API host override.
    pub telegram_api_base: Option<String>,
    /// Generative backend API key. Required.
    pub generative_api_key: Option<String>,
    /// Generative backend endpoint.
    pub generative_endpoint: Option<String>,
    /// Request shape: `generate` or `chat`.
    pub generative_flavor: Option<String>,
    /// Model name sent with each request.
    pub generative_model: Option<String>,
    /// Token budget per fallback reply.
    pub generative_max_tokens: Option<u32>,
    /// Generative request timeout in seconds.
    pub generative_timeout_secs: Option<u64>,
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Bound on each ledger call in seconds.
    pub storage_timeout_secs: Option<u64>,
    /// Long-poll window in seconds.
    pub poll_timeout_secs: Option<u64>,
    /// Seconds of inactivity before a user lane is retired.
    pub lane_idle_secs: Option<u64>,
    /// Directory for exported reports.
    pub report_dir: Option<PathBuf>,
    /// Image sent for the easter-egg command.
    pub image_path: Option<PathBuf>,
    /// Phrase that requests a stock export.
    pub export_phrase: Option<String>,
    /// Word that requests the image.
    pub image_trigger: Option<String>,
}

/// Configuration problems detected at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A required value is absent or blank.
    #[error("{key} must be set to a non-blank value")]
    Missing {
        /// Environment variable name.
        key: &'static str,
    },
    /// A URL value does not parse.
    #[error("{key} is not a valid URL: {message}")]
    InvalidUrl {
        /// Environment variable name.
        key: &'static str,
        /// Parser diagnostic.
        message: String,
    },
    /// The generative flavor is not recognised.
    #[error(transparent)]
    Flavor(#[from] UnknownFlavor),
}

/// Validated configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Bot API token.
    pub telegram_bot_token: String,
    /// Bot API host.
    pub telegram_api_base: String,
    /// Generative backend API key.
    pub generative_api_key: String,
    /// Generative backend endpoint.
    pub generative_endpoint: Url,
    /// Request shape.
    pub generative_flavor: GenerativeFlavor,
    /// Model name.
    pub generative_model: String,
    /// Token budget per reply.
    pub generative_max_tokens: u32,
    /// Generative request timeout.
    pub generative_timeout: Duration,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Bound on each ledger call.
    pub storage_timeout: Duration,
    /// Long-poll window.
    pub poll_timeout: Duration,
    /// Lane idle period.
    pub lane_idle: Duration,
    /// Report directory.
    pub report_dir: PathBuf,
    /// Easter-egg image.
    pub image_path: PathBuf,
    /// Export phrase.
    pub export_phrase: String,
    /// Image trigger word.
    pub image_trigger: String,
}

fn required(value: Option<&String>, key: &'static str) -> Result<String, SettingsError> {
    value
        .map(|raw| raw.trim())
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
        .ok_or(SettingsError::Missing { key })
}

fn non_blank_or(value: Option<&String>, default: &str) -> String {
    value
        .map(|raw| raw.trim())
        .filter(|trimmed| !trimmed.is_empty())
        .unwrap_or(default)
        .to_owned()
}

impl AssistantSettings {
    /// Validate required values and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for missing or blank required values, an
    /// unparsable endpoint, or an unknown flavor.
    pub fn resolve(&self) -> Result<ResolvedSettings, SettingsError> {
        let endpoint = non_blank_or(
            self.generative_endpoint.as_ref(),
            DEFAULT_GENERATIVE_ENDPOINT,
        );
        let generative_endpoint =
            Url::parse(&endpoint).map_err(|err| SettingsError::InvalidUrl {
                key: "STOCKBOT_GENERATIVE_ENDPOINT",
                message: err.to_string(),
            })?;
        let generative_flavor = match self.generative_flavor.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => GenerativeFlavor::default(),
        };

        Ok(ResolvedSettings {
            telegram_bot_token: required(
                self.telegram_bot_token.as_ref(),
                "STOCKBOT_TELEGRAM_BOT_TOKEN",
            )?,
            telegram_api_base: non_blank_or(self.telegram_api_base.as_ref(), DEFAULT_API_BASE),
            generative_api_key: required(
                self.generative_api_key.as_ref(),
                "STOCKBOT_GENERATIVE_API_KEY",
            )?,
            generative_endpoint,
            generative_flavor,
            generative_model: non_blank_or(
                self.generative_model.as_ref(),
                DEFAULT_GENERATIVE_MODEL,
            ),
            generative_max_tokens: self.generative_max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            generative_timeout: Duration::from_secs(
                self.generative_timeout_secs
                    .unwrap_or(DEFAULT_GENERATIVE_TIMEOUT_SECS),
            ),
            database_url: required(self.database_url.as_ref(), "STOCKBOT_DATABASE_URL")?,
            storage_timeout: self
                .storage_timeout_secs
                .map_or(DEFAULT_STORAGE_TIMEOUT, Duration::from_secs),
            poll_timeout: Duration::from_secs(
                self.poll_timeout_secs.unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
            ),
            lane_idle: Duration::from_secs(self.lane_idle_secs.unwrap_or(DEFAULT_LANE_IDLE_SECS)),
            report_dir: self
                .report_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
            image_path: self
                .image_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH)),
            export_phrase: non_blank_or(self.export_phrase.as_ref(), DEFAULT_EXPORT_PHRASE),
            image_trigger: non_blank_or(self.image_trigger.as_ref(), DEFAULT_IMAGE_TRIGGER),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 16] = [
        "STOCKBOT_TELEGRAM_BOT_TOKEN",
        "STOCKBOT_TELEGRAM_API_BASE",
        "STOCKBOT_GENERATIVE_API_KEY",
        "STOCKBOT_GENERATIVE_ENDPOINT",
        "STOCKBOT_GENERATIVE_FLAVOR",
        "STOCKBOT_GENERATIVE_MODEL",
        "STOCKBOT_GENERATIVE_MAX_TOKENS",
        "STOCKBOT_GENERATIVE_TIMEOUT_SECS",
        "STOCKBOT_DATABASE_URL",
        "STOCKBOT_STORAGE_TIMEOUT_SECS",
        "STOCKBOT_POLL_TIMEOUT_SECS",
        "STOCKBOT_LANE_IDLE_SECS",
        "STOCKBOT_REPORT_DIR",
        "STOCKBOT_IMAGE_PATH",
        "STOCKBOT_EXPORT_PHRASE",
        "STOCKBOT_IMAGE_TRIGGER",
    ];

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| (*value).to_owned());
                (*key, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AssistantSettings {
        AssistantSettings::load_from_iter([OsString::from("stock-assistant")])
            .expect("config should load")
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("STOCKBOT_TELEGRAM_BOT_TOKEN", "123:abc"),
        ("STOCKBOT_GENERATIVE_API_KEY", "gen-key"),
        ("STOCKBOT_DATABASE_URL", "postgres://localhost/stock"),
    ];

    #[rstest]
    fn defaults_apply_when_only_required_values_are_set() {
        let _guard = lock_env(env_with(&REQUIRED));

        let resolved = load_from_empty_args().resolve().expect("settings resolve");
        assert_eq!(resolved.telegram_bot_token, "123:abc");
        assert_eq!(resolved.telegram_api_base, DEFAULT_API_BASE);
        assert_eq!(
            resolved.generative_endpoint.as_str(),
            DEFAULT_GENERATIVE_ENDPOINT
        );
        assert_eq!(resolved.generative_flavor, GenerativeFlavor::Generate);
        assert_eq!(resolved.generative_model, DEFAULT_GENERATIVE_MODEL);
        assert_eq!(resolved.generative_max_tokens, 100);
        assert_eq!(resolved.generative_timeout, Duration::from_secs(60));
        assert_eq!(resolved.storage_timeout, Duration::from_secs(10));
        assert_eq!(resolved.poll_timeout, Duration::from_secs(60));
        assert_eq!(resolved.report_dir, PathBuf::from("reports"));
        assert_eq!(resolved.image_path, PathBuf::from("assets/sorpresa.png"));
        assert_eq!(resolved.export_phrase, "exportar stock");
        assert_eq!(resolved.image_trigger, "sorpresa");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut overrides = REQUIRED.to_vec();
        overrides.extend([
            ("STOCKBOT_GENERATIVE_FLAVOR", "chat"),
            ("STOCKBOT_GENERATIVE_ENDPOINT", "https://llm.example/v1/chat/completions"),
            ("STOCKBOT_GENERATIVE_MAX_TOKENS", "64"),
            ("STOCKBOT_STORAGE_TIMEOUT_SECS", "3"),
            ("STOCKBOT_REPORT_DIR", "/var/lib/stockbot/reports"),
            ("STOCKBOT_EXPORT_PHRASE", "bajar lista"),
        ]);
        let _guard = lock_env(env_with(&overrides));

        let resolved = load_from_empty_args().resolve().expect("settings resolve");
        assert_eq!(resolved.generative_flavor, GenerativeFlavor::ChatCompletions);
        assert_eq!(
            resolved.generative_endpoint.as_str(),
            "https://llm.example/v1/chat/completions"
        );
        assert_eq!(resolved.generative_max_tokens, 64);
        assert_eq!(resolved.storage_timeout, Duration::from_secs(3));
        assert_eq!(
            resolved.report_dir,
            PathBuf::from("/var/lib/stockbot/reports")
        );
        assert_eq!(resolved.export_phrase, "bajar lista");
    }

    #[rstest]
    #[case("STOCKBOT_TELEGRAM_BOT_TOKEN")]
    #[case("STOCKBOT_GENERATIVE_API_KEY")]
    #[case("STOCKBOT_DATABASE_URL")]
    fn missing_required_values_are_rejected(#[case] absent: &'static str) {
        let present: Vec<(&str, &str)> = REQUIRED
            .iter()
            .copied()
            .filter(|(key, _)| *key != absent)
            .collect();
        let _guard = lock_env(env_with(&present));

        let err = load_from_empty_args().resolve().expect_err("must fail");
        assert_eq!(err, SettingsError::Missing { key: absent });
    }

    #[rstest]
    fn blank_required_values_are_rejected() {
        let mut overrides = REQUIRED.to_vec();
        overrides.retain(|(key, _)| *key != "STOCKBOT_GENERATIVE_API_KEY");
        overrides.push(("STOCKBOT_GENERATIVE_API_KEY", "   "));
        let _guard = lock_env(env_with(&overrides));

        let err = load_from_empty_args().resolve().expect_err("must fail");
        assert_eq!(
            err,
            SettingsError::Missing {
                key: "STOCKBOT_GENERATIVE_API_KEY"
            }
        );
    }

    #[rstest]
    fn unknown_flavor_is_rejected() {
        let mut overrides = REQUIRED.to_vec();
        overrides.push(("STOCKBOT_GENERATIVE_FLAVOR", "completion"));
        let _guard = lock_env(env_with(&overrides));

        let err = load_from_empty_args().resolve().expect_err("must fail");
        assert_eq!(err, SettingsError::Flavor(UnknownFlavor("completion".to_owned())));
    }
}
