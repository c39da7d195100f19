use phish_rs::config::Config;
use phish_rs::logging;
use phish_rs::model::ModelBundle;
use phish_web::ApiServer;
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config file may be given as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    config.validate()?;

    logging::init(&config.logging)?;

    info!("Starting phish-web");
    info!("  Listening on: {}", config.server.listen_addr);
    info!("  Vectorizer: {}", config.model.vectorizer_path);
    info!("  Classifier: {}", config.model.classifier_path);

    let bundle = match ModelBundle::load(&config.model) {
        Ok(bundle) => bundle,
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            return Err(e.into());
        }
    };

    let server = ApiServer::new(bundle.email_classifier(), bundle.dimension(), &config);
    server.run().await?;

    Ok(())
}
