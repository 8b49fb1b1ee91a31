use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use sugarscape_core::config::SimConfig;
use sugarscape_core::world::World;

#[derive(Parser)]
#[command(name = "sugarscape")]
#[command(about = "Toroidal sugar-foraging simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and write the summary as JSON
    Run {
        /// Path to a config file (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the run summary (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Turn horizon; overrides the config's `turns`
        #[arg(long)]
        turns: Option<usize>,

        /// Turns at which to capture full grid/population snapshots
        #[arg(long, value_delimiter = ',', default_values_t = [1usize, 50, 500])]
        snapshot_turns: Vec<usize>,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config file {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("failed to parse config")
        }
        None => Ok(SimConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            out,
            turns,
            snapshot_turns,
        } => {
            let sim_config = load_config(config.as_ref())?;
            let turns = turns.unwrap_or(sim_config.turns);

            let mut world = World::new(sim_config).context("config validation error")?;
            println!("Simulating {turns} turns...");

            let summary = world
                .run_with_snapshots(turns, &snapshot_turns)
                .context("run exceeds supported bounds")?;

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(&summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Run complete. Summary saved to {}", summary_path.display());
            } else {
                println!(
                    "Run complete. Final alive: {}, total energy: {}",
                    summary.final_alive_count,
                    world.total_energy()
                );
            }
        }
    }
    Ok(())
}
