use clap::Parser;
use shop_users::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli::bootstrap();

    match cli.command {
        Command::Register(args) => cli::register::run(&config, args).await,
        Command::Check(args) => cli::check::run(&args),
    }
}
