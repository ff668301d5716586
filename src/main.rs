use anyhow::Result;
use resume_analyzer::config::Settings;
use resume_analyzer::{start_web_server, ResumeAnalyzer};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("resume_analyzer=info,rocket::server=off")),
        )
        .init();

    let settings = Settings::from_env()?;

    info!("Starting resume analysis API server");
    info!("Server: http://0.0.0.0:{}", settings.port);

    // Build the annotation capability once, before serving.
    let analyzer = ResumeAnalyzer::bootstrap();

    start_web_server(analyzer, settings).await
}
