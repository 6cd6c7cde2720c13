use anyhow::{Context, Result};
use itertools::Itertools;
use std::{path::Path, process};
use tuneatlife_assets::{
    config::{self, Config},
    gemini::GeminiClient,
    logger,
    prompts::{self, LogEntry, PromptConfig, PromptGenerator, PromptRun, TemplateWriter},
};

#[tokio::main]
async fn main() {
    if let Err(err) = logger::init() {
        eprintln!("Cannot initialize the logger: {:#}", err);
    }

    config::load_env_files();

    let config = match Config::load().await.context("Cannot load config file") {
        Ok(config) => config,
        Err(err) => abort(&PromptConfig::default().output_dir, err),
    };

    if let Err(err) = run(&config).await {
        abort(&config.prompts.output_dir, err);
    }
}

async fn run(config: &Config) -> Result<()> {
    let folder = config.delivery.folder.as_str();

    let run = match GeminiClient::from_env(&config.prompts.model) {
        Some(client) => {
            log::info!("Refining prompts with {}", client.model());
            PromptGenerator::new(config.prompts.clone(), folder, client)
                .run()
                .await?
        }
        None => {
            log::info!("GEMINI_API_KEY is not set, using template prompts");
            PromptGenerator::new(config.prompts.clone(), folder, TemplateWriter)
                .run()
                .await?
        }
    };

    summarize(&run);

    Ok(())
}

fn summarize(run: &PromptRun) {
    for (group, entries) in &run.prompts {
        log::info!("{:?}: {}", group, entries.keys().join(", "));
    }

    if !run.fallbacks.is_empty() {
        log::warn!(
            "{} prompts kept the template text: {}",
            run.fallbacks.len(),
            run.fallbacks.join(", ")
        );
    }

    log::info!(
        "Generated {} prompts into {}, log at {}",
        run.total(),
        run.prompts_path.display(),
        run.log_path.display()
    );
    if let Some(guide) = &run.guide {
        log::info!("Next steps in {}", guide.display());
    }
}

fn abort(output_dir: &Path, error: anyhow::Error) -> ! {
    log::error!("{:#}", error);

    if let Err(err) = prompts::append_log(output_dir, &LogEntry::error(&error)) {
        log::error!("Cannot record the failure: {:#}", err);
    }

    process::exit(1)
}
