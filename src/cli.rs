use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "automail",
    version,
    about = "Classify emails as productive or unproductive and triage the results"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[arg(
        long,
        global = true,
        env = "AUTOMAIL_API_URL",
        help = "Classifier base URL for this invocation"
    )]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Analyze(AnalyzeArgs),
    Inbox(InboxArgs),
    Health,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "file", "stdin"])))]
pub struct AnalyzeArgs {
    #[arg(long, help = "Email text to classify")]
    pub text: Option<String>,
    #[arg(long, help = "Upload a .txt or .pdf file")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Read the email text from stdin")]
    pub stdin: bool,
}

#[derive(Debug, Args)]
pub struct InboxArgs {
    #[arg(long, help = "Preload a .txt or .pdf file into the form")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    #[arg(long, help = "Classifier base URL")]
    pub base_url: Option<String>,
    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, help = "Terminal width at or below which the inbox uses one pane")]
    pub compact_breakpoint: Option<u16>,
    #[arg(long, help = "Duration of the detail exit transition in milliseconds")]
    pub exit_transition_ms: Option<u64>,
}
