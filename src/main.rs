use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockling::AppConfig;

#[derive(Parser)]
#[command(name = "blockling", about = "An articulated cube creature viewer")]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Render as fast as possible instead of waiting for vsync
    #[arg(long)]
    no_vsync: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("blockling starting");

    blockling::run(
        AppConfig::new()
            .size(cli.width, cli.height)
            .vsync(!cli.no_vsync),
    )
}
