use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = automail::cli::Cli::parse();

    if let Err(err) = automail::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
