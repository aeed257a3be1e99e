use serde::Serialize;

use crate::cli::{ConfigCommand, ConfigSetArgs};
use crate::config::{self, Settings, settings};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct EffectiveSettings {
    profile: String,
    settings_file: String,
    log_file: String,
    api_base_url: String,
    request_timeout_secs: u64,
    compact_breakpoint: u16,
    exit_transition_ms: u128,
}

pub fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let effective = effective(ctx, &ctx.settings)?;
            let lines = [
                format!("profile: {}", effective.profile),
                format!("settings file: {}", effective.settings_file),
                format!("log file: {}", effective.log_file),
                format!("api base url: {}", effective.api_base_url),
                format!("request timeout: {}s", effective.request_timeout_secs),
                format!("compact breakpoint: {} columns", effective.compact_breakpoint),
                format!("exit transition: {}ms", effective.exit_transition_ms),
            ];
            ctx.output.emit_lines(&lines, &effective)
        }
        ConfigCommand::Set(args) => {
            let stored = settings::load(ctx.paths.settings_file(&ctx.profile))?;
            let updated = apply(stored, args)?;
            config::save_settings(&ctx.paths, &ctx.profile, &updated)?;
            tracing::info!(profile = %ctx.profile, "settings saved");

            let text = format!("{}: settings saved", ctx.profile);
            ctx.output.emit(&text, &updated)
        }
    }
}

fn effective(ctx: &AppContext, settings: &Settings) -> AppResult<EffectiveSettings> {
    Ok(EffectiveSettings {
        profile: ctx.profile.clone(),
        settings_file: ctx.paths.settings_file(&ctx.profile).display().to_string(),
        log_file: ctx.paths.log_file().display().to_string(),
        api_base_url: settings.api_base_url(),
        request_timeout_secs: settings.request_timeout()?.as_secs(),
        compact_breakpoint: settings.compact_breakpoint(),
        exit_transition_ms: settings.exit_transition().as_millis(),
    })
}

fn apply(mut settings: Settings, args: ConfigSetArgs) -> AppResult<Settings> {
    let ConfigSetArgs {
        base_url,
        timeout_secs,
        compact_breakpoint,
        exit_transition_ms,
    } = args;

    if base_url.is_none()
        && timeout_secs.is_none()
        && compact_breakpoint.is_none()
        && exit_transition_ms.is_none()
    {
        return Err(AppError::InvalidInput(
            "nothing to set; pass at least one option".to_string(),
        ));
    }

    if let Some(url) = base_url {
        url::Url::parse(&url)?;
        settings.api_base_url = Some(url);
    }
    if let Some(secs) = timeout_secs {
        settings.request_timeout_secs = Some(secs);
        settings.request_timeout()?;
    }
    if compact_breakpoint.is_some() {
        settings.compact_breakpoint = compact_breakpoint;
    }
    if exit_transition_ms.is_some() {
        settings.exit_transition_ms = exit_transition_ms;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_args() -> ConfigSetArgs {
        ConfigSetArgs {
            base_url: None,
            timeout_secs: None,
            compact_breakpoint: None,
            exit_transition_ms: None,
        }
    }

    #[test]
    fn applies_only_provided_fields() {
        let stored = Settings {
            compact_breakpoint: Some(90),
            ..Settings::default()
        };
        let updated = apply(
            stored,
            ConfigSetArgs {
                base_url: Some("https://automail.example.com".to_string()),
                ..set_args()
            },
        )
        .expect("apply");

        assert_eq!(
            updated.api_base_url.as_deref(),
            Some("https://automail.example.com")
        );
        assert_eq!(updated.compact_breakpoint, Some(90));
    }

    #[test]
    fn rejects_empty_update_and_bad_url() {
        assert!(apply(Settings::default(), set_args()).is_err());
        assert!(
            apply(
                Settings::default(),
                ConfigSetArgs {
                    base_url: Some("not a url".to_string()),
                    ..set_args()
                },
            )
            .is_err()
        );
    }
}
