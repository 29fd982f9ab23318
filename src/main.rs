//! Saved Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use saved_downloader::{
    api::{authenticate, Credentials, InstagramApi},
    cli::{prompt_password, Args},
    config::{validate_config, Config, ConfigFile, FeedMode},
    download::{download_saved, HttpFetcher, MediaMaterializer},
    error::{exit_codes, Result},
    feed::{FeedPager, PageCache},
    output::{print_banner, print_config_summary, print_error, print_status, print_summary},
    settings::SettingsStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            return ExitCode::from(code as u8);
        }
    };

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    match run(args).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    print_banner();

    // Load configuration
    let mut config = Config::new(args.account.clone());
    if args.config.exists() {
        config.apply_file(&ConfigFile::load(&args.config)?);
    } else {
        tracing::debug!("No configuration file at {}", args.config.display());
    }
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let feed_mode = config.feed_mode();
    print_config_summary(
        &config.account_name,
        &feed_mode.to_string(),
        &config.posts_dir().display().to_string(),
    );

    let (pages, total_posts) = match feed_mode {
        FeedMode::Replay => {
            FeedPager::replay(PageCache::new(config.cache_dir()))
                .fetch_all()
                .await?
        }
        FeedMode::Network { cache_pages } => {
            let password = match &args.password {
                Some(password) => password.clone(),
                None => prompt_password(&config.account_name)?,
            };
            let credentials = Credentials::new(config.account_name.clone(), password);

            let api = InstagramApi::new()?;
            let store = SettingsStore::new(&config.settings_dir);
            let origin = authenticate(&api, &store, &credentials).await?;
            tracing::debug!("Session established: {:?}", origin);

            let cache = cache_pages.then(|| PageCache::new(config.cache_dir()));
            FeedPager::network(&api, cache).fetch_all().await?
        }
    };
    print_status(&format!("total posts: {}", total_posts));

    let fetcher = HttpFetcher::new()?;
    let materializer = MediaMaterializer::new(&fetcher, config.posts_dir());
    let stats = download_saved(&pages, total_posts, &materializer).await;

    print_summary(total_posts, &stats);

    Ok(())
}
