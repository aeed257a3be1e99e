use crate::error::{AppError, AppResult};

/// Profile names become file names, so path separators and dots are rejected.
pub fn resolve_profile(requested: &str) -> AppResult<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Ok("default".to_string());
    }

    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AppError::Config(format!(
            "invalid profile name `{trimmed}`; use letters, digits, `-` or `_`"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_falls_back_to_default() {
        assert_eq!(resolve_profile("  ").expect("resolve"), "default");
    }

    #[test]
    fn rejects_path_like_profiles() {
        assert!(resolve_profile("../etc").is_err());
        assert!(resolve_profile("work/alt").is_err());
        assert_eq!(resolve_profile(" work_2 ").expect("resolve"), "work_2");
    }
}
