//! Profile CLI: log in, render the profile, and update its visibility.
//!
//! The CLI is the terminal stand-in for the login and profile surfaces: it
//! stores the API key in a plain-text slot, fetches the profile through the
//! relay, and dispatches the visibility mutation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use credential::{ApiCredential, CredentialScheme};
use profile_client::{
    CredentialStore, FileCredentialStore, Profile, ProfileError, ProfileService, Visibility,
};
use tokio::runtime::Builder;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

/// `profile` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "profile",
    about = "Fetch and edit a Flexhire profile through the relay proxy",
    version
)]
struct CliArgs {
    /// Relay endpoint accepting GraphQL envelopes.
    #[arg(long, value_name = "url", default_value = "http://localhost:8080/api/graphql")]
    endpoint: Url,
    /// Header convention carrying the credential.
    #[arg(long, value_name = "scheme", default_value = "api-key")]
    scheme: CredentialScheme,
    /// Path of the credential slot.
    #[arg(long, value_name = "path", default_value = ".flexhire-api-key")]
    credential_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store an API key in the credential slot.
    Login {
        /// The API key to store; read from stdin when omitted.
        api_key: Option<String>,
    },
    /// Empty the credential slot.
    Logout,
    /// Fetch and render the profile.
    Show,
    /// Update the profile's visibility setting.
    SetVisibility {
        /// New visibility: private, public, or clients_only.
        visibility: Visibility,
    },
}

fn main() -> io::Result<()> {
    if let Err(init_error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        writeln!(io::stderr(), "tracing init failed: {init_error}")?;
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|runtime_error| io::Error::other(format!("create Tokio runtime: {runtime_error}")))?;
    runtime.block_on(run(CliArgs::parse()))
}

async fn run(args: CliArgs) -> io::Result<()> {
    let store = Arc::new(FileCredentialStore::new(args.credential_file));

    match args.command {
        Command::Login { api_key } => {
            let raw = match api_key {
                Some(value) => value,
                None => read_stdin_token()?,
            };
            let token = ApiCredential::new(raw)
                .map_err(|validation| io::Error::other(validation.to_string()))?;
            store
                .save(&token)
                .map_err(|store_error| io::Error::other(store_error.to_string()))?;
            writeln!(io::stdout(), "credential stored")
        }
        Command::Logout => {
            store
                .clear()
                .map_err(|store_error| io::Error::other(store_error.to_string()))?;
            writeln!(io::stdout(), "credential cleared")
        }
        Command::Show => {
            let service = build_service(args.endpoint, args.scheme, store)?;
            let profile = service.fetch_profile().await.map_err(map_profile_error)?;
            render_profile(&profile)
        }
        Command::SetVisibility { visibility } => {
            let service = build_service(args.endpoint, args.scheme, store)?;
            let mut profile = service.fetch_profile().await.map_err(map_profile_error)?;
            service
                .update_visibility(&mut profile, visibility)
                .await
                .map_err(map_profile_error)?;
            writeln!(io::stdout(), "visibility set to {visibility}")
        }
    }
}

fn read_stdin_token() -> io::Result<String> {
    let mut raw = String::new();
    io::stdin().read_line(&mut raw)?;
    Ok(raw)
}

fn build_service(
    endpoint: Url,
    scheme: CredentialScheme,
    store: Arc<FileCredentialStore>,
) -> io::Result<ProfileService> {
    ProfileService::new(endpoint, scheme, store)
        .map_err(|client_error| io::Error::other(format!("build relay client: {client_error}")))
}

fn map_profile_error(profile_error: ProfileError) -> io::Error {
    match profile_error {
        ProfileError::CredentialMissing => {
            io::Error::other("no credential stored; run `profile login <api-key>` first")
        }
        other => io::Error::other(other.to_string()),
    }
}

fn render_profile(profile: &Profile) -> io::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "name:       {}", profile.name)?;
    writeln!(out, "avatar:     {}", profile.avatar_url)?;
    writeln!(out, "visibility: {}", profile.visibility)?;
    writeln!(out, "skills:")?;
    for skill in &profile.skills {
        writeln!(out, "  - {skill}")?;
    }
    writeln!(out, "job applications:")?;
    for application in &profile.job_applications {
        writeln!(out, "  - {}", application.title)?;
    }
    Ok(())
}
