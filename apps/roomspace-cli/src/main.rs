mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roomspace_author::{EditorConfig, EditorSession};
use roomspace_render::{DebugTextRenderer, Renderer};
use roomspace_tools::SceneInspector;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::script::{Player, Script};

#[derive(Parser)]
#[command(name = "roomspace-cli", about = "CLI tool for roomspace editing sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default editor settings
    Info,
    /// Replay a JSON session script and print the resulting room
    Run {
        /// Script file
        script: PathBuf,
        /// Editor config file (JSON); overrides the script's own config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the primitive limit
        #[arg(long)]
        max_primitives: Option<usize>,
        /// Include the floor and walls in the listing
        #[arg(long)]
        show_fixtures: bool,
        /// Print the scene event log
        #[arg(long)]
        events: bool,
    },
    /// Import an OBJ model into an empty room and report its fit
    Import {
        /// OBJ file
        path: PathBuf,
    },
}

fn load_config(path: &Path) -> anyhow::Result<EditorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn print_frame(session: &EditorSession, show_fixtures: bool) {
    let renderer = DebugTextRenderer { show_fixtures };
    print!("{}", renderer.render(session.scene(), &session.camera().view()));
    println!("{}", SceneInspector::summary(session.scene()));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = EditorConfig::default();
            println!("roomspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("defaults: {}", serde_json::to_string(&config)?);
            println!("camera: w/s forward, a/d strafe, q/e up/down, space boost");
            println!("selection: arrows move on the floor, PageUp/PageDown vertical, Enter confirms");
        }
        Commands::Run {
            script,
            config,
            max_primitives,
            show_fixtures,
            events,
        } => {
            let loaded = Script::load(&script)?;
            let mut editor_config = match config {
                Some(path) => load_config(&path)?,
                None => loaded.config.clone().unwrap_or_default(),
            };
            if let Some(max) = max_primitives {
                editor_config.max_primitives = max;
            }

            let base_dir = script.parent().unwrap_or(Path::new(".")).to_path_buf();
            let player = Player::new(base_dir);
            let mut session = EditorSession::new(editor_config);

            for (index, step) in loaded.steps.iter().enumerate() {
                match player.apply(&mut session, step) {
                    Ok(Some(message)) => println!("[{}] {message}", index + 1),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::debug!(step = index + 1, ?step, "step rejected");
                        println!("[{}] error: {err}", index + 1);
                    }
                }
            }

            println!();
            print_frame(&session, show_fixtures);
            println!("Manipulable: {}", session.manipulable_ids().join(", "));

            if events {
                for event in session.scene_mut().drain_events() {
                    println!("  {event:?}");
                }
            }
        }
        Commands::Import { path } => {
            let mut session = EditorSession::default();
            let id = session.import_model(&path)?;
            if let Some(info) = SceneInspector::inspect_node(session.scene(), id) {
                println!("{info}");
            }
            print_frame(&session, false);
        }
    }

    Ok(())
}
