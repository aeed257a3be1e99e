use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::logging::{self, LogTarget};

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        json,
        verbose,
        api_url,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(profile, json, verbose, api_url)?;

    let log_file = ctx.paths.log_file();
    let target = match command {
        Command::Inbox(_) => LogTarget::File(&log_file),
        _ => LogTarget::Stderr,
    };
    logging::init(ctx.verbose, target)?;
    tracing::debug!(profile = %ctx.profile, api = %ctx.classifier.base_url(), "context ready");

    match command {
        Command::Analyze(args) => commands::analyze::run(&ctx, args).await,
        Command::Inbox(args) => commands::inbox::run(&ctx, args).await,
        Command::Health => commands::health::run(&ctx).await,
        Command::Config(args) => commands::config::run(&ctx, args.command),
    }
}
