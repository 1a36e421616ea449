#![deny(missing_docs)]
//! Shipyard command-line interface.
//!
//! Searches, reads, and edits ships held by a Shipyard server.

mod client;

use clap::{Args, Parser, Subcommand, ValueEnum};
use client::{DEFAULT_SERVER_URL, ShipClient};
use serde_json::{Value, json};
use shipyard_core::{NAME_PARAM, SearchParams, Ship, TYPE_PARAM};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "shipyard", version, about = "Shipyard CLI")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    output: OutputArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct ConnectionArgs {
    /// Base URL of the Shipyard server.
    #[arg(long = "server", env = "SHIPYARD_API_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server_url: String,
}

#[derive(Args, Clone, Debug)]
struct OutputArgs {
    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    /// Write results to a file instead of stdout.
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search ships by name fragment or type codes; no filter lists every ship.
    Search {
        /// Substring of the ship name.
        #[arg(long)]
        name: Option<String>,
        /// Ship type code (X, C, M, F, S); repeatable or comma-separated.
        #[arg(long, value_delimiter = ',')]
        typ: Vec<String>,
    },
    /// Show a single ship.
    Get {
        /// Ship identifier.
        id: Uuid,
    },
    /// Create a ship from a JSON file.
    Create {
        /// JSON file holding the ship.
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace a ship with the contents of a JSON file.
    Update {
        /// Ship identifier.
        id: Uuid,
        /// JSON file holding the ship.
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a ship.
    Delete {
        /// Ship identifier.
        id: Uuid,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg_attr(test, allow(dead_code))]
async fn run(cli: Cli) -> CliResult<()> {
    let client = ShipClient::new(&cli.connection.server_url)?;
    let contents = execute(&client, cli.command, cli.output.format).await?;
    emit_output(&cli.output, &contents).await
}

async fn execute(client: &ShipClient, command: Commands, format: OutputFormat) -> CliResult<String> {
    match command {
        Commands::Search { name, typ } => {
            let ships = client.search(&search_params(name, typ)).await?;
            render_ships(&ships, format)
        }
        Commands::Get { id } => {
            let ship = client.get(id).await?;
            render_ships(std::slice::from_ref(&ship), format)
        }
        Commands::Create { file } => {
            let payload = read_payload(&file).await?;
            let location = client.create(&payload).await?;
            render_status(format, json!({ "status": "created", "location": location }))
        }
        Commands::Update { id, file } => {
            let payload = read_payload(&file).await?;
            client.update(id, &payload).await?;
            render_status(format, json!({ "status": "updated", "id": id }))
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            render_status(format, json!({ "status": "deleted", "id": id }))
        }
    }
}

fn search_params(name: Option<String>, typ: Vec<String>) -> SearchParams {
    let mut params = SearchParams::new();
    if let Some(name) = name {
        params.push(NAME_PARAM, name);
    }
    for code in typ {
        params.push(TYPE_PARAM, code);
    }
    params
}

async fn read_payload(path: &Path) -> CliResult<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let payload = serde_json::from_str(&raw)
        .map_err(|err| format!("{} is not valid JSON: {err}", path.display()))?;
    Ok(payload)
}

/// Print the rendered ships, or save them when `--output` names a file.
async fn emit_output(output: &OutputArgs, contents: &str) -> CliResult<()> {
    let Some(path) = output.output.as_deref() else {
        print!("{contents}");
        return Ok(());
    };
    let saved = async {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir).await?,
            _ => {}
        }
        tokio::fs::write(path, contents).await
    };
    saved
        .await
        .map_err(|err| format!("failed to write {}: {err}", path.display()).into())
}

fn render_ships(ships: &[Ship], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(ships)?)),
        OutputFormat::Text => Ok(render_ships_text(ships)),
    }
}

fn render_status(format: OutputFormat, status: Value) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&status)?)),
        OutputFormat::Text => {
            let verb = status["status"].as_str().unwrap_or("done");
            let target = status
                .get("location")
                .or_else(|| status.get("id"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(format!("Ship {verb}: {target}\n"))
        }
    }
}

fn render_ships_text(ships: &[Ship]) -> String {
    let mut output = String::new();
    for (index, ship) in ships.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        let id = ship.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(output, "Ship: {} ({id})", ship.name);
        let _ = writeln!(output, "Type: {}", ship.typ);
        let _ = writeln!(output, "Built: {}", ship.build_year);
        let _ = writeln!(output, "Capacity: {}", ship.capacity);
        let _ = writeln!(
            output,
            "Home port: {}, {}",
            ship.home_port.name, ship.home_port.country
        );
        if ship.crew.is_empty() {
            let _ = writeln!(output, "Crew: none");
        } else {
            let _ = writeln!(output, "Crew:");
            for member in &ship.crew {
                let name = format!("{} {}", member.first_name, member.last_name);
                let _ = writeln!(output, "  - {} ({})", name.trim(), member.role);
            }
        }
    }
    output
}
