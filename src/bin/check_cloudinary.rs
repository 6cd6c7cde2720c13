use anyhow::{Context, Result};
use tuneatlife_assets::{
    catalog::Category,
    cloudinary::{
        troubleshooting, CloudinaryClient, PartialCredentials, UploadRequest, UploadSource,
    },
    config::{self, Config},
    http::Error,
    logger,
};

/// 1x1 transparent PNG.
const TEST_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
const TEST_PUBLIC_ID: &str = "connection-test";

const ASSET_FOLDERS: [Category; 6] = [
    Category::Experts,
    Category::Testimonials,
    Category::Icons,
    Category::Features,
    Category::Social,
    Category::Logo,
];

#[tokio::main]
async fn main() -> Result<()> {
    logger::init()?;
    config::load_env_files();

    let config = Config::load().await.context("Cannot load config file")?;
    let partial = PartialCredentials::from_env();

    log::info!("Cloudinary configuration:");
    log::info!("  cloud name: {}", presence(&partial.cloud_name));
    log::info!("  api key:    {}", presence(&partial.api_key));
    log::info!("  api secret: {}", presence(&partial.api_secret));

    let credentials = match partial.complete() {
        Ok(credentials) => credentials,
        Err(err) => {
            log::error!("{}", err);
            log::info!("Add the missing values to .env.local:");
            log::info!("  CLOUDINARY_CLOUD_NAME=<cloud name>");
            log::info!("  CLOUDINARY_API_KEY=<api key>");
            log::info!("  CLOUDINARY_API_SECRET=<api secret>");
            log::info!("All three are on the Cloudinary console dashboard");
            return Ok(());
        }
    };

    let client = CloudinaryClient::new(credentials);
    if let Err(err) = check(&client, &config.delivery.folder).await {
        log::error!("Connection failed: {:#}", err);

        if let Some(api_error) = err.downcast_ref::<Error>() {
            for hint in troubleshooting(api_error) {
                log::info!("  {}", hint);
            }
        }
    }

    Ok(())
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "missing"
    }
}

async fn check(client: &CloudinaryClient, folder: &str) -> Result<()> {
    let ping = client.ping().await.context("Cannot reach the Admin API")?;
    log::info!("Ping {}: {}", client.cloud_name(), ping.status);

    let usage = client.usage().await.context("Cannot read account usage")?;
    log::info!(
        "Plan {}, {:.2} credits used, {} MB stored",
        usage.plan,
        usage.credits.usage,
        usage.storage_megabytes()
    );

    let request = UploadRequest::new(
        UploadSource::Remote(TEST_IMAGE.to_owned()),
        folder_path(folder, "test"),
        TEST_PUBLIC_ID,
    )
    .tags(["test", "connection"]);

    let uploaded = client
        .upload_image(&request)
        .await
        .context("Test upload failed")?;
    log::info!("Test upload stored at {}", uploaded.secure_url);

    let destroyed = client
        .destroy(&uploaded.public_id)
        .await
        .context("Cannot delete the test upload")?;
    log::info!("Test upload removed: {}", destroyed.result);

    for category in ASSET_FOLDERS {
        let path = folder_path(folder, category.as_str());
        match client.create_folder(&path).await {
            Ok(_) => log::info!("Folder {} ready", path),
            Err(Error::ApiError { message, .. }) if message.contains("already exists") => {
                log::info!("Folder {} already exists", path)
            }
            Err(err) => log::warn!("Cannot create folder {}: {:#}", path, err),
        }
    }

    log::info!("Cloudinary is ready for uploads");
    Ok(())
}

fn folder_path(base: &str, name: &str) -> String {
    let base = base.trim_matches('/');
    if base.is_empty() {
        name.to_owned()
    } else {
        format!("{}/{}", base, name)
    }
}
