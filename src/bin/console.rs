use std::fs;

use filedock::{
    client::{Credentials, HttpFileService},
    config::AppConfig,
    console, page::FilesPage,
};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().expect("failed to load config");

    // Interactive screen: logs go to file only.
    fs::create_dir_all(&config.log_dir).expect("failed to create log directory");
    let file_appender = rolling::never(&config.log_dir, "console.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _guard = guard;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("failed to init logging filter");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    info!(backend = %config.backend_url, "starting filedock console");

    let credentials = match &config.session_cookie {
        Some(cookie) => Credentials::from_cookie(cookie.clone()),
        None => Credentials::anonymous(),
    };
    let service = HttpFileService::new(config.backend_url.clone(), credentials);
    let mut page = FilesPage::new(service);

    console::run(&mut page, &config.download_dir).await
}
