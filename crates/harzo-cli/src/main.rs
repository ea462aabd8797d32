use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harzo_infrastructure::HarzoPaths;

mod commands;
mod logging;

use commands::context::AppContext;
use commands::settings::SettingsArgs;

#[derive(Parser)]
#[command(name = "harzo")]
#[command(about = "Harzo Gen - AI image studio", long_about = None)]
struct Cli {
    /// Use this directory instead of ~/.config/harzo
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image from a text prompt
    Create {
        prompt: String,
        /// Rewrite the prompt with the text model first
        #[arg(long)]
        enhance: bool,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Directory to save the result into
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Edit an image according to an instruction
    Transform {
        image: PathBuf,
        instruction: String,
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Reimagine the person in a photo as a persona
    Persona {
        image: PathBuf,
        /// Persona preset id (see `harzo presets`)
        #[arg(long, conflicts_with = "instruction")]
        preset: Option<String>,
        /// Free-form persona description
        #[arg(long)]
        instruction: Option<String>,
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Extend the canvas of an image
    Expand {
        image: PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Print an enhanced version of a prompt
    Enhance { prompt: String },
    /// Browse and manage past generations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List persona, style, lighting and camera presets
    Presets,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Show one entry's metadata as JSON
    Show { id: String },
    /// Delete one entry
    Delete { id: String },
    /// Delete every entry
    Clear,
    /// Write an entry's image to disk
    Save {
        id: String,
        #[arg(long, short, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = HarzoPaths::new(cli.home.as_deref());
    let _log_guard = logging::init(&paths)?;
    let context = AppContext::load(paths)?;

    match cli.command {
        Commands::Create {
            prompt,
            enhance,
            settings,
            output,
        } => commands::generate::create(&context, prompt, enhance, &settings, output).await?,
        Commands::Transform {
            image,
            instruction,
            settings,
            output,
        } => commands::generate::transform(&context, &image, instruction, &settings, output).await?,
        Commands::Persona {
            image,
            preset,
            instruction,
            settings,
            output,
        } => {
            commands::generate::persona(&context, &image, preset, instruction, &settings, output)
                .await?
        }
        Commands::Expand {
            image,
            settings,
            output,
        } => commands::generate::expand(&context, &image, &settings, output).await?,
        Commands::Enhance { prompt } => commands::generate::enhance(&context, prompt).await?,
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&context).await?,
            HistoryAction::Show { id } => commands::history::show(&context, &id).await?,
            HistoryAction::Delete { id } => commands::history::delete(&context, &id).await?,
            HistoryAction::Clear => commands::history::clear(&context).await?,
            HistoryAction::Save { id, output } => {
                commands::history::save(&context, &id, &output).await?
            }
        },
        Commands::Presets => commands::presets::print(),
    }

    Ok(())
}
