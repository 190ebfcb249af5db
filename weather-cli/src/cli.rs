use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{CityQuery, Config, OpenWeatherProvider, WeatherWidget, fetch_snapshot};

use crate::render;

const QUIT_WORDS: [&str; 3] = [":q", "quit", "exit"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a subcommand an interactive search session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show the current weather for one city and exit.
    Show {
        /// City name, e.g. "Lima" or "New York".
        city: String,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city, json }) => show(&city, json).await,
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    if key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(key);
    let path = config.save()?;
    println!("Saved API key to {}", path.display());

    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    debug!(?config, "loaded configuration");

    let city = CityQuery::parse(city)?;
    let provider = OpenWeatherProvider::new(config);
    let snapshot = fetch_snapshot(&provider, &city).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render::snapshot(&snapshot));
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    debug!(?config, "loaded configuration");

    let default_city = config.default_city.clone();
    let mut widget = WeatherWidget::new(OpenWeatherProvider::new(config));

    println!("🌤️  Weather lookup. Type a city and press Enter; Esc or `quit` to leave.");
    search(&mut widget, &default_city).await;

    loop {
        let line = match Text::new("City:")
            .with_placeholder("🔍 Search a city...")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        if QUIT_WORDS.contains(&line.trim()) {
            break;
        }

        widget.state_mut().set_input(line);
        let input = widget.state().input().to_string();
        search(&mut widget, &input).await;
    }

    Ok(())
}

/// Same flow as `WeatherWidget::search`, but prints the loading line while
/// the request is in flight.
async fn search(widget: &mut WeatherWidget<OpenWeatherProvider>, raw: &str) {
    if let Some(ticket) = widget.state_mut().begin_search(raw) {
        println!("{}", render::panel(widget.state()));
        let outcome = widget.fetch(&ticket).await;
        widget.state_mut().settle(ticket, outcome);
    }

    println!("{}\n", render::panel(widget.state()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn show_parses_city_and_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json", "-v"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Command::Show { city, json }) => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn configure_takes_no_arguments() {
        let cli = Cli::try_parse_from(["weather", "configure"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Configure)));
        assert!(Cli::try_parse_from(["weather", "configure", "openweather"]).is_err());
    }
}
