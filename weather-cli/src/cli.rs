use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::info;
use weather_core::{
    App, Config, ERROR_MESSAGE, InfoCard, TITLE, WeatherProvider, config::API_KEY_ENV,
    provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Look up the current weather by city")]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search cities interactively (default).
    Search,

    /// Show the weather for one city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Print the record as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Store the API key and default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Search) {
            Command::Search => {
                let config = load_config(self.config.as_deref())?;
                search(&config).await
            }
            Command::Show { city, json } => {
                let config = load_config(self.config.as_deref())?;
                show(&config, &city, json).await
            }
            Command::Configure => configure(self.config.as_deref()),
        }
    }
}

/// Config from disk with the environment's API key layered on top.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
}

async fn search(config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(provider_from_config(config)?);

    println!("{TITLE}\n");

    if let Some(city) = config.default_city.as_deref() {
        app.search(city).await;
    }
    print_view(&app, config);

    loop {
        let answer = Text::new("City Name:")
            .with_validator(inquire::required!("Please enter a city name"))
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        let city = match answer {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        app.set_input(city);
        app.submit().await;
        print_view(&app, config);
    }

    Ok(())
}

async fn show(config: &Config, city: &str, json: bool) -> anyhow::Result<()> {
    let mut app = App::new(provider_from_config(config)?);
    app.search(city).await;

    if app.state().error {
        return Err(anyhow!(ERROR_MESSAGE));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(app.record())?);
    } else {
        println!("{}", InfoCard::from_record(app.record(), &config.images));
    }

    Ok(())
}

fn configure(path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(inquire::required!("API key must not be empty"))
        .prompt()
        .context("Failed to read API key")?;
    config.api_key = Some(api_key.trim().to_string());

    let mut city_prompt = Text::new("Default city (optional):")
        .with_help_message("Fetched when an interactive session starts");
    if let Some(current) = config.default_city.as_deref() {
        city_prompt = city_prompt.with_default(current);
    }
    let city = city_prompt.prompt().context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    info!(path = %saved_to.display(), "configuration saved");
    println!("Saved configuration to {}", saved_to.display());
    Ok(())
}

fn print_view<P: WeatherProvider + ?Sized>(app: &App<P>, config: &Config) {
    if let Some(message) = app.state().error_message() {
        println!("\u{26a0}\u{fe0f}  {message}");
    }
    println!("{}\n", InfoCard::from_record(app.record(), &config.images));
}
