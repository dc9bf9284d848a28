use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use wupkit::{commands, default_config_path, init_logging, Config, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "wupkit")]
#[command(about = "Inspect and edit WUP wall-panel machine files", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print entity counts, bounds and unhandled statements
    Inspect {
        /// WUP file
        file: PathBuf,
    },
    /// Print the parsed model as JSON
    Json {
        /// WUP file
        file: PathBuf,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the re-serialized document
    Roundtrip {
        /// WUP file
        file: PathBuf,
    },
    /// Move an entity and print the edited document
    Translate {
        /// WUP file
        file: PathBuf,
        /// Editor id as shown by `inspect`
        #[arg(long)]
        id: u64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dx: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        dy: f64,
        /// Re-parse the whole document instead of patching the model
        #[arg(long)]
        reparse: bool,
    },
    /// Delete an entity and print the edited document
    Delete {
        /// WUP file
        file: PathBuf,
        /// Editor id as shown by `inspect`
        #[arg(long)]
        id: u64,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match default_config_path() {
            Ok(path) => Ok(Config::load_or_default(&path)?),
            Err(_) => Ok(Config::default()),
        },
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    debug!("wupkit {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Inspect { file } => {
            let editor = commands::open_editor(&read_input(&file)?, &config)?;
            commands::inspect(editor.model(), &config.output)?
        }
        Commands::Json { file, pretty } => {
            let editor = commands::open_editor(&read_input(&file)?, &config)?;
            commands::to_json(editor.model(), pretty || config.output.pretty_json)?
        }
        Commands::Roundtrip { file } => {
            let editor = commands::open_editor(&read_input(&file)?, &config)?;
            editor.to_wup()
        }
        Commands::Translate {
            file,
            id,
            dx,
            dy,
            reparse,
        } => {
            let mut editor = commands::open_editor(&read_input(&file)?, &config)?;
            commands::translate(&mut editor, id, dx, dy, reparse)?
        }
        Commands::Delete { file, id } => {
            let mut editor = commands::open_editor(&read_input(&file)?, &config)?;
            commands::delete(&mut editor, id)?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
