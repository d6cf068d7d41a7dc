//! OAuth authorization core operator CLI
//!
//! Loads the registered client file named by `REGISTERED_CLIENTS_FILE` and
//! exercises the client registry and authorization store against it.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Validate the registration file
//! REGISTERED_CLIENTS_FILE=demos/clients.json oauth-authz validate
//!
//! # Show one client
//! oauth-authz show --client-id client-a
//!
//! # Issue an authorization code and resolve it back
//! oauth-authz issue --client-id client-a --principal alice --code
//! ```
//!
//! Exit codes:
//! - 0: Success
//! - 1: Configuration, file, or validation error
//! - 2: Client not found

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use oauth_authz::{
    config::Config,
    oauth::{
        AUTHORIZATION_CODE_KEY, AccessToken, Authorization, RegisteredClient, TokenType,
        clients::load_client_store, types::generate_token,
    },
    storage::{MemoryRegisteredClientStore, RegisteredClientStore, create_authorization_store},
};
use std::process;
use tracing_subscriber::prelude::*;

/// Main CLI application structure
#[derive(Parser)]
#[command(name = "oauth-authz", version, about = "OAuth authorization core tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the registration file and report the registered clients
    Validate,
    /// Print a registered client as JSON
    Show(ShowArgs),
    /// Issue an authorization for a client and resolve it back by token
    Issue(IssueArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ShowArgs {
    /// Internal client identifier
    #[arg(long)]
    id: Option<String>,
    /// Public client identifier
    #[arg(long)]
    client_id: Option<String>,
}

#[derive(Args)]
struct IssueArgs {
    /// Public client identifier
    #[arg(long)]
    client_id: String,
    /// Resource owner the authorization is granted to
    #[arg(long)]
    principal: String,
    /// Issue an authorization code instead of an access token
    #[arg(long)]
    code: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "oauth_authz=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(err) => {
            tracing::error!(error = ?err, "command failed");
            eprintln!("{err:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the requested client is not registered.
fn run(cli: Cli) -> Result<bool> {
    let config = Config::new()?;
    tracing::info!(version = ?config.version, "Starting oauth-authz");

    let clients = load_client_store(config.registered_clients_file.as_ref())?;

    match cli.command {
        Commands::Validate => {
            validate(&clients);
            Ok(true)
        }
        Commands::Show(args) => {
            let client = match (args.id, args.client_id) {
                (Some(id), _) => clients.find_by_id(&id)?,
                (None, Some(client_id)) => clients.find_by_client_id(&client_id)?,
                (None, None) => None,
            };
            let Some(client) = client else {
                eprintln!("client not found");
                return Ok(false);
            };
            println!("{}", serde_json::to_string_pretty(&client)?);
            Ok(true)
        }
        Commands::Issue(args) => {
            let Some(client) = clients.find_by_client_id(&args.client_id)? else {
                eprintln!("client not found: {}", args.client_id);
                return Ok(false);
            };
            let authorization = issue(&config, &client, &args)?;
            println!("{}", serde_json::to_string_pretty(&authorization)?);
            Ok(true)
        }
    }
}

fn validate(clients: &MemoryRegisteredClientStore) {
    println!("{} registered client(s)", clients.len());
    for client in clients.clients() {
        let grant_types: Vec<_> = client
            .authorization_grant_types()
            .iter()
            .map(|grant| grant.as_str())
            .collect();
        println!(
            "  {} ({}): {}",
            client.client_id(),
            client.id(),
            grant_types.join(", ")
        );
    }
}

fn issue(config: &Config, client: &RegisteredClient, args: &IssueArgs) -> Result<Authorization> {
    let store = create_authorization_store(&config.storage_backend);
    let token = generate_token();

    let builder = Authorization::builder()
        .registered_client_id(client.id())
        .principal_name(&args.principal);
    let (authorization, token_type) = if args.code {
        (
            builder.attribute(AUTHORIZATION_CODE_KEY, &token).build()?,
            TokenType::AuthorizationCode,
        )
    } else {
        let access_token = AccessToken::bearer(
            &token,
            *config.access_token_expiration.as_ref(),
            client.scopes().clone(),
        )?;
        (
            builder.access_token(access_token).build()?,
            TokenType::AccessToken,
        )
    };

    store.save(authorization)?;
    store
        .find_by_token_and_type(&token, &token_type)?
        .ok_or_else(|| anyhow::anyhow!("issued authorization could not be resolved"))
}
