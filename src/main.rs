use anyhow::Context;
use clap::Parser;

use spotify_now::auth::Authenticator;
use spotify_now::cli::{self, Commands, ConfigAction, print_completions};
use spotify_now::config::{self, Config};
use spotify_now::flows;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");

        if std::env::var("SPOTIFY_DEBUG").is_ok() {
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match &cli.command {
        Commands::Config { action } => handle_config(action, &config, cli.quiet)?,
        Commands::Completions { shell } => {
            print_completions(*shell);
        }
        Commands::AcquireToken => {
            let auth = authenticator(&config)?;
            flows::acquire_token(&auth, cli.quiet).await;
        }
        Commands::NowPlaying => {
            let auth = authenticator(&config)?;
            flows::get_currently_playing(&auth, &config, &cli.format).await;
        }
    }

    Ok(())
}

fn authenticator(config: &Config) -> anyhow::Result<Authenticator> {
    let credentials = config::resolve_credentials(config)?;
    let auth = Authenticator::new(
        &credentials,
        config.token_cache_path(),
        config.auth_endpoint.as_deref(),
        config.token_endpoint.as_deref(),
    )?;
    Ok(auth)
}

fn handle_config(action: &ConfigAction, config: &Config, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!(
                "client_id: {}",
                config.client_id.as_deref().unwrap_or("(not set)")
            );
            if let Some(secret) = &config.client_secret {
                println!("client_secret: {}", mask(secret));
            } else {
                println!("client_secret: (not set)");
            }
            println!(
                "redirect_uri: {}",
                config
                    .redirect_uri
                    .as_deref()
                    .unwrap_or(config::DEFAULT_REDIRECT_URI)
            );
            println!(
                "scope: {}",
                config.scope.as_deref().unwrap_or(config::DEFAULT_SCOPE)
            );
            println!("token_cache: {}", config.token_cache_path().display());
            if let Some(endpoint) = &config.api_endpoint {
                println!("api_endpoint: {}", endpoint);
            }
        }
        ConfigAction::Path => {
            if let Some(path) = Config::path() {
                println!("{}", path.display());
            } else {
                println!("Could not determine config path");
            }
        }
        ConfigAction::Init => {
            let path = Config::init_template()?;
            if !quiet {
                println!("Template written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn mask(secret: &str) -> String {
    if secret.len() >= 8 {
        format!("{}...{}", &secret[..4], &secret[secret.len() - 4..])
    } else {
        "***".to_string()
    }
}
