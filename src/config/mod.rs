pub mod paths;
pub mod profile;
pub mod settings;

pub use paths::AppPaths;
pub use profile::resolve_profile;
pub use settings::Settings;

use crate::error::AppResult;

/// Loads the profile's settings, letting a one-off `--api-url` win over the file.
pub fn load_settings(
    paths: &AppPaths,
    profile: &str,
    api_url_override: Option<&str>,
) -> AppResult<Settings> {
    let mut settings = settings::load(paths.settings_file(profile))?;
    if let Some(url) = api_url_override.map(str::trim).filter(|url| !url.is_empty()) {
        settings.api_base_url = Some(url.to_string());
    }
    Ok(settings)
}

pub fn save_settings(paths: &AppPaths, profile: &str, settings: &Settings) -> AppResult<()> {
    settings::save(paths.settings_file(profile), settings)
}
