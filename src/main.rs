use clap::Parser;
use dosette::cli::commands::{Cli, Commands};
use dosette::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let store_dir = cli.store_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = dosette::tui::run(store_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before store discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
