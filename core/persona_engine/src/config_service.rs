use regex::Regex;
use shared_types::AppConfig;
use std::env;
use std::fs;

use crate::error::{EngineError, EngineResult};

/// Load the TOML configuration at `path`, expanding `{{VAR_NAME}}` placeholders
/// from the process environment first.
pub fn load_config(path: &str) -> EngineResult<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| EngineError::Config(format!("failed to read config file {path}: {e}")))?;
    parse_config(&content)
}

/// Parse configuration text. Unset variables are left as their literal placeholder.
pub fn parse_config(content: &str) -> EngineResult<AppConfig> {
    let re = Regex::new(r"\{\{([a-zA-Z0-9_]+)\}\}")
        .map_err(|e| EngineError::Config(format!("failed to create regex: {e}")))?;

    let processed_content = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        env::var(var_name).unwrap_or_else(|_| format!("{{{{{}}}}}", var_name))
    });

    toml::from_str(&processed_content)
        .map_err(|e| EngineError::Config(format!("failed to parse config file: {e}")))
}
