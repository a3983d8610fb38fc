use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

pub fn is_defined(opt: &Option<String>) -> bool {
    opt.as_ref().map(|s| !s.is_empty()).unwrap_or(false)
}

/// Read an environment variable, treating an empty value as unset.
pub fn non_empty_env(name: &str) -> Option<String> {
    let value = std::env::var(name).ok();
    if is_defined(&value) {
        value
    } else {
        None
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"))
}

/// Replaces `${VAR_NAME}` references in `input` with the variable's value.
/// Fails if any referenced variable is not set.
pub fn resolve_env_placeholders(input: &str) -> Result<String> {
    let mut resolved = input.to_string();
    for caps in placeholder_regex().captures_iter(input) {
        let var_name = &caps[1];
        let env_val = std::env::var(var_name)
            .with_context(|| format!("Environment variable '{var_name}' is not set"))?;
        resolved = resolved.replace(&caps[0], &env_val);
    }
    Ok(resolved)
}
