use crate::config::types::{AdmissionConfig, Config, CrawlerConfig, OutputConfig};
use crate::extract::Rules;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// All checks run before the first fetch; a failing config means the crawl
/// never begins.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_admission_config(&config.admission)?;
    validate_seeds(config)?;
    validate_output_config(&config.output)?;

    // Compiling the rule set exercises every selector and bio label mapping;
    // a bad selector or unknown field key surfaces here, not mid-crawl.
    Rules::compile(config)?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if let Some(budget) = config.max_runtime_secs {
        if budget < 1 {
            return Err(ConfigError::Validation(
                "max-runtime-secs must be >= 1 when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the admission policy
fn validate_admission_config(config: &AdmissionConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "admission.allowed-domains cannot be empty".to_string(),
        ));
    }

    if config.allow.is_empty() {
        return Err(ConfigError::Validation(
            "admission.allow cannot be empty; an empty allow-list admits nothing".to_string(),
        ));
    }

    for pattern in config
        .allowed_domains
        .iter()
        .chain(&config.allow)
        .chain(&config.block)
    {
        if pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "admission patterns cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates seed URLs
fn validate_seeds(config: &Config) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url =
            Url::parse(seed).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", seed, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "seed must be http(s): {}",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for path in [&config.events_path, &config.fighters_path] {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output paths cannot be empty".to_string(),
            ));
        }
    }

    if let Some(json_path) = &config.json_path {
        if json_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.json-path cannot be blank when set".to_string(),
            ));
        }
    }

    Ok(())
}
