//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::BackendKind;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "gemini_api_key" => config.gemini_api_key = Some(value.to_string()),
        "openrouter_api_key" => config.openrouter_api_key = Some(value.to_string()),
        "backend" => config.backend = Some(value.to_lowercase()),
        "model" => config.model = Some(value.to_string()),
        "listen" => config.listen = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;

    // Never echo credentials back
    if key.ends_with("api_key") {
        presenter.success(&format!("{} = {}", key, mask_api_key(value)));
    } else {
        presenter.success(&format!("{} = {}", key, value));
    }

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "gemini_api_key" => config.gemini_api_key.map(|s| mask_api_key(&s)),
        "openrouter_api_key" => config.openrouter_api_key.map(|s| mask_api_key(&s)),
        "backend" => config.backend,
        "model" => config.model,
        "listen" => config.listen,
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "gemini_api_key",
        &config
            .gemini_api_key
            .map(|s| mask_api_key(&s))
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "openrouter_api_key",
        &config
            .openrouter_api_key
            .map(|s| mask_api_key(&s))
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value("backend", config.backend.as_deref().unwrap_or("(not set)"));
    presenter.key_value("model", config.model.as_deref().unwrap_or("(not set)"));
    presenter.key_value("listen", config.listen.as_deref().unwrap_or("(not set)"));

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "backend" => {
            value
                .parse::<BackendKind>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "listen" => {
            value
                .parse::<std::net::SocketAddr>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!("Invalid listen address '{}'. Expected host:port", value),
                })?;
        }
        _ => {} // api keys and model accept any string
    }
    Ok(())
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        "*".repeat(key.len())
    } else {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_api_key_long() {
        let masked = mask_api_key("abcdefghijklmnop");
        assert_eq!(masked, "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        let masked = mask_api_key("short");
        assert_eq!(masked, "*****");
    }

    #[test]
    fn validate_backend_valid() {
        assert!(validate_config_value("backend", "gemini").is_ok());
        assert!(validate_config_value("backend", "openrouter").is_ok());
    }

    #[test]
    fn validate_backend_invalid() {
        assert!(validate_config_value("backend", "invalid").is_err());
    }

    #[test]
    fn validate_listen_valid() {
        assert!(validate_config_value("listen", "127.0.0.1:8787").is_ok());
        assert!(validate_config_value("listen", "0.0.0.0:9000").is_ok());
    }

    #[test]
    fn validate_listen_invalid() {
        assert!(validate_config_value("listen", "not-an-address").is_err());
        assert!(validate_config_value("listen", "localhost").is_err());
    }

    #[test]
    fn validate_api_key_accepts_any() {
        assert!(validate_config_value("gemini_api_key", "whatever").is_ok());
        assert!(validate_config_value("model", "any/model-name").is_ok());
    }
}
