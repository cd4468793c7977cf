use clap::Parser;

use shelfplan::cli::{run, Cli};
use shelfplan::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.log_json)?;
    tracing::debug!("shelfplan {} (built {})", shelfplan::VERSION, shelfplan::BUILD_DATE);

    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}
