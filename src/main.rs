use anyhow::Result;
use suppressor::cli::{Cli, Commands, RuleArgs};
use suppressor::config::{Config, CONFIG_FILE};
use suppressor::engine;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SUPPRESSOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file settings, extended by rule sources given as flags.
fn load_config(args: RuleArgs) -> Result<Config> {
    let project_root = std::env::current_dir()?;
    let mut cfg = Config::load(args.config.as_deref(), &project_root)?;
    if args.suppressions.is_some() {
        cfg.suppressions_file = args.suppressions;
    }
    if args.structured.is_some() {
        cfg.structured_file = args.structured;
    }
    cfg.suppress.extend(args.suppress);
    Ok(cfg)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            format,
            rules,
            fail_on,
            no_unmatched,
            unused_function_checking,
        } => {
            let mut cfg = load_config(rules)?;
            cfg.report_unmatched &= !no_unmatched;
            cfg.unused_function_checking |= unused_function_checking;
            let result = engine::run(&input, &cfg)?;

            let output_format = format.unwrap_or(cfg.format);
            suppressor::cli::output::render(&result, output_format);

            if result.has_severity_at_least(fail_on) {
                std::process::exit(1);
            }
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(CONFIG_FILE);
            if path.exists() {
                eprintln!("{CONFIG_FILE} already exists");
                std::process::exit(1);
            }
            std::fs::write(&path, Config::default_toml())?;
            println!("Created {CONFIG_FILE}");
        }
        Commands::Rules { rules } => {
            let cfg = load_config(rules)?;
            match cfg.build_suppressions() {
                Ok(suppressions) => {
                    for rule in suppressions.iter() {
                        println!("{rule}");
                    }
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
