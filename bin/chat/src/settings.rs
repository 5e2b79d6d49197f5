//! Chat front end settings.
//!
//! Loaded via the `config` crate from `FINSMART_`-prefixed environment
//! variables, with `__` separating nested keys, e.g.
//! `FINSMART_ASSISTANT__REPLY_DELAY_MS=500`.
//!
//! See [`AssistantConfig`] for the assistant settings.

use config::{Config, ConfigError, Environment};
use finsmart_conversation::AssistantConfig;
use serde::Deserialize;

/// Front end configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct ChatConfig {
    /// Assistant session and provider settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl ChatConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(environment())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FINSMART")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Environment source backed by a fixed map instead of the process env.
#[cfg(test)]
fn environment_from(vars: &[(&str, &str)]) -> Environment {
    let map: config::Map<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    environment().source(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ChatConfig::from_environment(environment_from(&[])).expect("load");

        assert_eq!(
            config.assistant.greeting,
            AssistantConfig::default().greeting
        );
        assert_eq!(config.assistant.reply_delay(), Duration::from_millis(1500));
        assert!(config.assistant.response_timeout().is_none());
    }

    #[test]
    fn nested_variables_override_assistant_settings() {
        let config = ChatConfig::from_environment(environment_from(&[
            ("FINSMART_ASSISTANT__REPLY_DELAY_MS", "250"),
            ("FINSMART_ASSISTANT__RESPONSE_TIMEOUT_MS", "5000"),
            ("FINSMART_ASSISTANT__GREETING", "Welcome back"),
        ]))
        .expect("load");

        assert_eq!(config.assistant.reply_delay(), Duration::from_millis(250));
        assert_eq!(
            config.assistant.response_timeout(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.assistant.greeting, "Welcome back");
    }

    #[test]
    fn unparseable_delay_is_an_error() {
        let result = ChatConfig::from_environment(environment_from(&[(
            "FINSMART_ASSISTANT__REPLY_DELAY_MS",
            "soon",
        )]));

        assert!(result.is_err());
    }
}
