//! Anime browser CLI application.

use anime_api::AnimeClient;
use anime_browser::render::{help_text, render_crash};
use anime_browser::{run_guarded, App, Command, Outcome, Route, Step};
use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, LogConfig};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging (debug level, mirrored to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Render the route once and exit
    #[arg(long)]
    once: bool,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,

    /// Route to open, e.g. `/search?q=naruto`
    #[arg(default_value = "/")]
    route: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        if args.config.exists() {
            anyhow::bail!("Refusing to overwrite existing config {}", args.config.display());
        }
        Config::default().save(&args.config)?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    // Load configuration; a missing file means defaults
    let config_found = args.config.exists();
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = LogConfig::from_config(&config, "anime-browser");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
        log_config.console = true;
    }
    shared::logging::init(log_config)?;

    info!("Anime browser starting");
    if config_found {
        info!(config_file = %args.config.display(), "Loaded configuration");
    } else {
        warn!(config_file = %args.config.display(), "Config file not found, using defaults");
    }

    let client = AnimeClient::from_config(&config.api).context("Failed to create API client")?;
    info!(base_url = %client.base_url(), "API client ready");

    let initial = Route::parse(&args.route);
    let build = |route: Route| Box::new(App::new(client.clone(), config.browser.clone(), route));

    let mut last_route = initial.clone();
    let mut app = match run_guarded(build(initial), None).await {
        Step::Done(app, _, screen) => {
            println!("{screen}");
            Some(app)
        }
        Step::Crashed(reason) => {
            println!("{}", render_crash(&reason));
            None
        }
    };

    if args.once {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        // After a crash only reload, help and quit are accepted. A rebuilt app
        // mounts its route instead of running a command.
        let (current, command) = match app.take() {
            Some(current) => (current, Some(command)),
            None => match command {
                Command::Quit => break,
                Command::Reload => (build(last_route.clone()), None),
                Command::Help => {
                    println!("{}", help_text());
                    continue;
                }
                _ => {
                    println!("{}", render_crash("Ketik `reload` untuk memuat ulang halaman"));
                    continue;
                }
            },
        };

        match run_guarded(current, command).await {
            Step::Done(next, outcome, screen) => {
                last_route = next.route();
                println!("{screen}");
                if outcome == Outcome::Quit {
                    break;
                }
                app = Some(next);
            }
            Step::Crashed(reason) => {
                println!("{}", render_crash(&reason));
            }
        }
    }

    info!("Anime browser finished");
    Ok(())
}
