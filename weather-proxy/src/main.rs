use anyhow::Context;
use weather_proxy::{App, Settings, startup::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Failed to load settings from environment")?;
    init_tracing(settings.environment);

    let app = App::build(&settings).await?;
    app.run().await.context("Weather proxy server failed")?;

    Ok(())
}
