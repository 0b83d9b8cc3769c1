use clap::Parser;
use typeprint::cli::{self, Cli};

fn main() {
    // Parse before logging init so --log-level can take effect.
    let cli = Cli::parse();
    typeprint::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    log::debug!("Starting typeprint {}", typeprint::VERSION);

    let stdout = std::io::stdout();
    let result = cli::run(&cli, &mut stdout.lock());
    log::logger().flush();

    if let Err(e) = result {
        // Non-zero exit so scripts see the failure.
        eprintln!("typeprint: error: {e:#}");
        std::process::exit(1);
    }
}
