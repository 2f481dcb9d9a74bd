//! CLI entry point for the meridian-explore workbench.
//!
//! Logs go to stderr so stdout stays machine-readable: `expand` and the
//! create commands print the assembled `GraphSnapshot` as JSON for the
//! rendering widget, `ask` prints one formatted line per result row.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use meridian_explore::format::format_row;
use meridian_explore::ExploreSession;
use meridian_sparql::{NlqClient, SparqlClient, SparqlConfig};

#[derive(Parser)]
#[command(name = "meridian-explore")]
#[command(about = "Incremental exploration workbench for the Meridian knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: meridian).
    #[arg(short, long, default_value = "meridian", global = true)]
    config: String,

    /// Per-fetch timeout in seconds.
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Expand entities into one session and print the snapshot as JSON.
    Expand {
        /// Entity IRIs to expand, in order.
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// List OWL classes.
    Classes,
    /// List object properties.
    Properties,
    /// List individuals.
    Individuals,
    /// Create an individual, expand it, and print the snapshot.
    CreateIndividual {
        /// Class IRI for the new individual.
        #[arg(long)]
        class: String,
        /// Display name; whitespace becomes underscores in the minted IRI.
        #[arg(long)]
        name: String,
    },
    /// Create a relation, expand both endpoints, and print the snapshot.
    CreateRelation {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        predicate: String,
        #[arg(long)]
        object: String,
    },
    /// Ask a natural-language question about the graph.
    Ask { question: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sparql_config = load_sparql_config(&cli.config);
    let client = SparqlClient::new(sparql_config.clone())?;
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Command::Expand { uris } => {
            let mut session = ExploreSession::new();
            for uri in &uris {
                session.expand(&client, uri, timeout).await?;
            }
            print_snapshot(&session)?;
        }
        Command::Classes => print_lines(client.classes().await?),
        Command::Properties => print_lines(client.object_properties().await?),
        Command::Individuals => print_lines(client.individuals().await?),
        Command::CreateIndividual { class, name } => {
            let minted = client.create_individual(&class, &name).await?;
            let mut session = ExploreSession::new();
            session.expand(&client, minted.as_str(), timeout).await?;
            print_snapshot(&session)?;
        }
        Command::CreateRelation {
            subject,
            predicate,
            object,
        } => {
            client
                .create_relation(&subject, &predicate, &object)
                .await?;
            let mut session = ExploreSession::new();
            session.expand(&client, &subject, timeout).await?;
            session.expand(&client, &object, timeout).await?;
            print_snapshot(&session)?;
        }
        Command::Ask { question } => {
            let nlq = NlqClient::new(&sparql_config)?;
            let answer = nlq.ask(&question).await?;

            if let Some(query) = &answer.sparql_query {
                eprintln!("generated query:\n{query}");
            }
            if let Some(error) = &answer.error {
                eprintln!("query error: {error}");
            }
            if answer.results.is_empty() {
                eprintln!("no results");
            }
            for row in &answer.results {
                println!("{}", format_row(row));
            }
        }
    }

    Ok(())
}

fn print_snapshot(session: &ExploreSession) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn print_lines(values: Vec<String>) {
    for value in values {
        println!("{value}");
    }
}

fn load_sparql_config(file_prefix: &str) -> SparqlConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MERIDIAN")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => c.get::<SparqlConfig>("sparql").unwrap_or_default(),
        Err(_) => SparqlConfig::default(),
    }
}
