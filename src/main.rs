#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_solo::{
    cli, init_logging, snapshot, FileStore, GameDriver, Settings, SnapshotFormat,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Battleship against the computer", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct SaveArgs {
    #[arg(long, help = "Directory holding the saved game")]
    save_dir: Option<PathBuf>,
    #[arg(long, help = "Snapshot encoding: json or bincode")]
    format: Option<SnapshotFormat>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Delay before the computer answers, in milliseconds")]
        delay_ms: Option<u64>,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Print the saved game, if any.
    ShowSave {
        #[command(flatten)]
        save: SaveArgs,
    },
}

#[cfg(feature = "std")]
fn apply_save_args(settings: &mut Settings, args: SaveArgs) {
    if let Some(dir) = args.save_dir {
        settings.save_dir = dir;
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let level = init_logging();
    log::debug!("log level {}", level);
    let cli = Cli::parse();
    let mut settings = Settings::from_env();

    match cli.command {
        Commands::Play { seed, delay_ms, save } => {
            if seed.is_some() {
                settings.seed = seed;
            }
            if let Some(ms) = delay_ms {
                settings.reply_delay = Duration::from_millis(ms);
            }
            apply_save_args(&mut settings, save);
            if let Some(s) = settings.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }

            let store = FileStore::new(settings.save_dir.clone());
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            let printer = tokio::spawn(cli::print_events(rx));
            let mut driver = GameDriver::new(settings, store, tx).map_err(|e| anyhow::anyhow!(e))?;
            let mut source = cli::StdinSource::new();
            driver.run(&mut source).await?;
            drop(driver);
            printer.await?;
        }
        Commands::ShowSave { save } => {
            apply_save_args(&mut settings, save);
            let store = FileStore::new(settings.save_dir.clone());
            match snapshot::load_game(&store, &settings.save_key, settings.format) {
                Ok(session) => {
                    println!("Phase: {:?}", session.phase());
                    println!("{}", cli::format_boards(session.player_board(), session.computer_board()));
                }
                Err(e) => println!("{}", e),
            }
        }
    }
    Ok(())
}
