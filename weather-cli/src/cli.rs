use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use weather_core::{
    Config, NormalizedWeather, ProxyClient, QuerySession, QueryState,
    location::{Coordinates, NominatimResolver},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather proxy client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the address of the weather proxy.
    Configure,

    /// Show current weather for a place.
    Show {
        /// Place name, e.g. "Paris" or "Oslo,no". Detected from --lat/--lon when absent.
        place: Option<String>,

        /// Latitude of the current position.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the current position.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Proxy url, overriding the configured one.
        #[arg(long)]
        server: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place, lat, lon, server } => {
                let position = lat
                    .zip(lon)
                    .map(|(latitude, longitude)| Coordinates { latitude, longitude });
                show(place, position, server).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let url = inquire::Text::new("Weather proxy url:")
        .with_default(cfg.server_url())
        .prompt()
        .context("Failed to read proxy url")?;

    cfg.set_server_url(&url)?;
    cfg.save()?;

    println!("Saved proxy url {} to {}", cfg.server_url(), Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    place: Option<String>,
    position: Option<Coordinates>,
    server: Option<String>,
) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let server = server.as_deref().unwrap_or(cfg.server_url());

    let client = ProxyClient::new(server)?;
    let resolver = NominatimResolver::new(position)?;
    let mut session = QuerySession::new(client, resolver).with_observer(|state| {
        if state.is_loading() {
            eprintln!("Loading...");
        }
    });

    let state = match place {
        Some(place) => {
            session.set_input(place);
            session.submit().await
        }
        None => session.load().await,
    };

    match state {
        QueryState::Loaded(weather) => {
            print!("{}", render(&weather));
            Ok(())
        }
        QueryState::Failed(message) => bail!(message),
        QueryState::Idle | QueryState::Loading => bail!(
            "Could not detect your location. Pass a place (`weather show Paris`) or --lat/--lon."
        ),
    }
}

fn render(weather: &NormalizedWeather) -> String {
    format!(
        "Location:    {}\n\
         Condition:   {}\n\
         Temperature: {}°C\n\
         Wind speed:  {} m/s\n\
         Humidity:    {} %\n",
        weather.location, weather.weather, weather.temperature, weather.wind_speed, weather.humidity,
    )
}
