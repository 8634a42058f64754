//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into the service, run once.
//! No business logic here; the pipeline lives in PostingService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use xkcd_vk_poster::adapters::random::OsRandom;
use xkcd_vk_poster::adapters::vk::{DryRunVkAdapter, VkClient};
use xkcd_vk_poster::adapters::xkcd::XkcdAdapter;
use xkcd_vk_poster::ports::{ComicSource, RandomSource, SocialApi};
use xkcd_vk_poster::shared::config::AppConfig;
use xkcd_vk_poster::usecases::{ComicService, PostingService};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let span = info_span!("run", pid = std::process::id());
    run(cwd, env_loaded.is_ok()).instrument(span).await
}

async fn run(cwd: PathBuf, env_loaded: bool) -> anyhow::Result<()> {
    if env_loaded {
        info!("loaded .env");
    } else {
        info!(cwd = %cwd.display(), "no .env found (check CWD)");
    }

    let cfg = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("config: {}", e))?
        .into_posting_config()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    info!(
        group_id = cfg.group_id,
        api_version = %cfg.credentials.api_version,
        scratch = %cfg.temp_img_folder.display(),
        timeout_secs = cfg.request_timeout.as_secs(),
        "configuration loaded"
    );

    // --- Adapters ---
    let comics: Arc<dyn ComicSource> = Arc::new(
        XkcdAdapter::new(cfg.comic_api_url.clone(), cfg.request_timeout)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let rng: Arc<dyn RandomSource> = Arc::new(OsRandom);
    let api: Arc<dyn SocialApi> = if cfg.dry_run {
        warn!("DRY_RUN set, VK calls are only logged");
        Arc::new(DryRunVkAdapter::new())
    } else {
        Arc::new(
            VkClient::new(cfg.vk_api_url.clone(), cfg.request_timeout)
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    };

    // --- Service ---
    let service = PostingService::new(
        ComicService::new(comics, rng),
        api,
        cfg.credentials,
        cfg.group_id,
        cfg.temp_img_folder,
    );

    match service.run().await {
        Ok(stats) => {
            info!(attachment = %stats.attachment, post_id = ?stats.post_id, "done");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "posting failed");
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
