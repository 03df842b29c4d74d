use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tiodb::config::{Args, Command, ServerCommand, UserCommand};
use tiodb::{Config, TioClient, telemetry};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &dyn TioClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Check => {
            client.ping().await?;
            println!("{} ({}) is reachable", client.identify(), client.backend());
        }
        Command::User(UserCommand::Get { name }) => {
            let user = client.get_user(&name).await?;
            // The credential never leaves the process.
            print_json(&serde_json::json!({ "id": user.id, "name": user.name }))?;
        }
        Command::Server(ServerCommand::List { uid, name, limit }) => {
            let servers = match (uid, name) {
                (Some(uid), Some(name)) => client.list_servers_by_owner(uid, limit, &name).await?,
                _ => client.list_servers().await?,
            };
            print_json(&servers)?;
        }
        Command::Server(ServerCommand::Get { id, name }) => {
            let server = match (id, name) {
                (Some(id), _) => client.get_server(id).await?,
                (None, Some(name)) => client.get_server_by_name(&name).await?,
                (None, None) => anyhow::bail!("either --id or --name is required"),
            };
            print_json(&server)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    tracing::debug!("{:?}", args);

    // Fail fast: without a reachable backend there is nothing to run.
    let client = tiodb::get_client(&config.backend, &config.database_url, &config.pool, config.query_timeout)
        .await
        .context("Failed to initialize database client")?;

    let result = run(client.as_ref(), args.command.unwrap_or(Command::Check)).await;
    client.close().await;
    result
}
