use anyhow::{Context, Result};
use std::{path::Path, process};
use tuneatlife_assets::{
    cloudinary::{CloudinaryClient, Credentials},
    config::{self, Config, UploadConfig},
    delivery::UrlBuilder,
    logger, report,
    upload::{Orchestrator, Outcome},
};

#[tokio::main]
async fn main() {
    if let Err(err) = logger::init() {
        eprintln!("Cannot initialize the logger: {:#}", err);
    }

    config::load_env_files();

    let config = match Config::load().await.context("Cannot load config file") {
        Ok(config) => config,
        Err(err) => abort(&UploadConfig::default().output_dir, err),
    };

    if let Err(err) = run(&config).await {
        abort(&config.upload.output_dir, err);
    }
}

async fn run(config: &Config) -> Result<()> {
    log::info!(
        "Starting {} upload ({} environment)",
        config.upload.category,
        config.runtime.environment
    );
    log::info!(
        "Error telemetry {}",
        if config.runtime.telemetry_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let credentials = Credentials::from_env().context("Cannot read Cloudinary credentials")?;
    if credentials.cloud_name != config.delivery.cloud_name {
        log::warn!(
            "Uploading to cloud {} but delivering from {}",
            credentials.cloud_name,
            config.delivery.cloud_name
        );
    }

    let orchestrator = Orchestrator::new(
        config.upload.clone(),
        UrlBuilder::new(config.delivery.clone()),
        CloudinaryClient::new(credentials),
        &config.runtime.environment,
    );

    match orchestrator.run().await? {
        Outcome::NoImages { guide: Some(guide) } => {
            log::info!("Add images and run again, see {}", guide.display())
        }
        Outcome::NoImages { guide: None } => log::info!(
            "Add images to {} and run again",
            config.upload.input_dir.display()
        ),
        Outcome::Completed(run) => log::info!(
            "Finished: {} uploaded, {} failed, reports in {}",
            run.uploaded.len(),
            run.failures.len(),
            config.upload.output_dir.display()
        ),
    }

    Ok(())
}

fn abort(output_dir: &Path, error: anyhow::Error) -> ! {
    log::error!("{:#}", error);

    match report::write_error_report(output_dir, &error) {
        Ok(path) => log::info!("Error report written to {}", path.display()),
        Err(err) => log::error!("Cannot write the error report: {:#}", err),
    }

    process::exit(1)
}
