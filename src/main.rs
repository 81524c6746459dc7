use anyhow::Result;
use clap::{Parser, Subcommand};
use moran_core::config::MoranConfig;
use moran_io::{load_archive, save_archive};
use moran_lib::app::Runner;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation and print its summary
    Run {
        /// TOML config file; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Override the step limit for runs that cannot play to completion
        #[arg(short, long)]
        generations: Option<usize>,

        /// Write the full run archive here (gzip when the name ends in .gz)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the summary of a saved run archive
    Show {
        path: PathBuf,

        /// Also print per-generation distributions
        #[arg(long)]
        records: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    moran_core::init_logging_with_filter(&args.log);

    match args.command {
        Command::Run {
            config,
            seed,
            generations,
            output,
        } => {
            let mut runner = match config {
                Some(path) => Runner::from_path(path)?,
                None => Runner::new(MoranConfig::default())?,
            };
            if let Some(seed) = seed {
                runner = runner.with_seed(seed);
            }
            if let Some(generations) = generations {
                runner = runner.with_max_generations(generations);
            }

            let archive = runner.run()?;
            println!("{}", serde_json::to_string_pretty(&archive.summary)?);
            if let Some(path) = output {
                save_archive(&archive, &path)?;
                tracing::info!(path = %path.display(), "Run archive written");
            }
        }
        Command::Show { path, records } => {
            let archive = load_archive(&path)?;
            println!("{}", serde_json::to_string_pretty(&archive.summary)?);
            if records {
                for record in archive.records() {
                    println!("{}\t{:?}", record.generation, record.distribution);
                }
            }
        }
    }

    Ok(())
}
