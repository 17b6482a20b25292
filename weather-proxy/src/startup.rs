use actix_cors::Cors;
use actix_web::{
    HttpServer,
    dev::Server,
    web::{self, Data},
};
use anyhow::{Context, bail};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;
use weather_core::{WeatherProvider, provider::OpenWeatherProvider};

use crate::{
    routes,
    settings::{Environment, Settings},
};

pub struct App {
    server: Server,
    port: u16,
}

impl App {
    pub async fn build(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = match (settings.api_key(), settings.environment) {
            (Some(key), _) => key.to_string(),
            (None, Environment::Production) => {
                bail!("API_KEY must be set when running in production")
            }
            (None, Environment::Development) => {
                tracing::warn!("API_KEY is not set, upstream requests will be rejected");
                String::new()
            }
        };

        let provider = OpenWeatherProvider::new(api_key, settings.upstream_options())
            .context("Failed to build upstream weather client")?;

        let listener = TcpListener::bind((settings.bind_host.as_str(), settings.port))
            .with_context(|| format!("Failed to bind {}:{}", settings.bind_host, settings.port))?;
        let port = listener.local_addr()?.port();

        let server = create_server(provider, listener)?;

        tracing::info!(
            port,
            environment = ?settings.environment,
            upstream = %settings.upstream_url,
            "weather proxy listening"
        );

        Ok(App { server, port })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        self.server.await
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

fn create_server<P>(provider: P, listener: TcpListener) -> Result<Server, std::io::Error>
where
    P: WeatherProvider + 'static,
{
    let provider = Data::new(provider);

    let server = HttpServer::new(move || {
        let scope = web::scope("/api")
            .route("/weather", web::get().to(routes::weather::weather::<P>))
            .route("/weather/", web::get().to(routes::weather::weather::<P>))
            .route("/weather/{location}", web::get().to(routes::weather::weather::<P>));

        actix_web::App::new()
            .app_data(provider.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .service(scope)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(environment: Environment) {
    let default_level = match environment {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}
