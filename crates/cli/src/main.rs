//! Memini CLI - reminiscence session engine.

mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memini_core::{ordered_dimensions, Topic};
use memini_oracle::Oracle;
use memini_progress::ProgressSnapshot;
use memini_session::{SessionConfig, SessionController, TurnInput};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::script::ReplayScript;

#[derive(Parser)]
#[command(name = "memini")]
#[command(about = "Guided reminiscence session engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List dimensions and their milestones
    Catalog,
    /// List selectable topics
    Topics,
    /// Replay a recorded session against the tracker
    Replay {
        /// Script file (JSON)
        script: PathBuf,
        /// Topic label, overrides the script's
        #[arg(long)]
        topic: Option<String>,
        /// Session config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print a JSON progress snapshot after each turn
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => {
            for dim in ordered_dimensions() {
                println!("{:<6} {}", dim, dim.milestones().join(", "));
            }
        }
        Commands::Topics => {
            for topic in Topic::SELECTABLE {
                println!("  {}", topic);
            }
        }
        Commands::Replay { script, topic, config, json } => {
            let script = ReplayScript::load(&script)?;
            let config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    SessionConfig::from_json(&text)
                        .with_context(|| format!("parsing config {}", path.display()))?
                }
                None => SessionConfig::default(),
            };
            let topic = topic.as_deref().map(Topic::from_label).or_else(|| script.topic());

            replay(script, topic, config, json).await?;
        }
    }

    Ok(())
}

async fn replay(
    script: ReplayScript,
    topic: Option<Topic>,
    config: SessionConfig,
    json: bool,
) -> Result<()> {
    let oracle: Arc<dyn Oracle> = Arc::new(script.oracle(topic));

    let mut session = match &script.opening {
        Some(opening) => {
            SessionController::from_opening(oracle, TurnInput::text(opening.clone()))
                .await?
                .with_config(config)
        }
        None => {
            let mut session =
                SessionController::new(topic.unwrap_or_default(), oracle).with_config(config);
            session.greet();
            session
        }
    };

    info!("Replaying {} turns on topic {}", script.turns.len(), session.context().topic);
    for turn in session.transcript() {
        println!("{}: {}", turn.role.speaker(), turn.text);
    }

    for (index, turn) in script.turns.iter().enumerate() {
        if !session.context().is_active() {
            println!("(session ended, {} scripted turns skipped)", script.turns.len() - index);
            break;
        }

        let outcome = session.submit_turn(TurnInput::text(turn.input.clone())).await?;
        println!("User: {}", turn.input);
        println!("Memini: {}", outcome.reply);

        let snapshot = session.snapshot();
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            println!("{}", render_rail(&snapshot));
        }

        if outcome.is_session_complete {
            println!("(session complete)");
        }
    }

    session.finish();
    let summary = session.summarize().await;
    println!();
    println!("Summary: {} ({}, {})", summary.feedback, summary.persona, summary.color);

    Ok(())
}

/// One-line progress rail: covered tabs in caps, the active tab marked.
fn render_rail(snapshot: &ProgressSnapshot) -> String {
    let tabs: Vec<String> = snapshot
        .dimensions
        .iter()
        .map(|status| {
            let label = if status.covered {
                status.dimension.as_str().to_uppercase()
            } else {
                status.dimension.as_str().to_string()
            };
            let marks: String = status
                .milestones
                .iter()
                .map(|m| if m.covered { '#' } else { '.' })
                .collect();
            if status.active {
                format!(">{}[{}]", label, marks)
            } else {
                format!("{}[{}]", label, marks)
            }
        })
        .collect();

    format!("  {} {:>3}%", tabs.join(" "), snapshot.percentage())
}
