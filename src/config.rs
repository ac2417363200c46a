use std::{env, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub log_dir: PathBuf,
    pub session_cookie: Option<String>,
    pub download_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SERVER_PORT: {err}")))?;

        let backend_url = env::var("BACKEND_URL")
            .map_err(|_| AppError::Config("missing BACKEND_URL".into()))?
            .trim_end_matches('/')
            .to_string();
        if backend_url.is_empty() {
            return Err(AppError::Config("BACKEND_URL is empty".into()));
        }

        let log_dir = PathBuf::from(env::var("FILEDOCK_LOG_DIR").unwrap_or_else(|_| "./log".into()));

        // A full cookie pair ("session=...") handed over by whatever performed
        // the login. Absent means calls go out anonymously.
        let session_cookie = env::var("SESSION_COOKIE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let download_dir = PathBuf::from(
            env::var("FILEDOCK_DOWNLOAD_DIR").unwrap_or_else(|_| "./downloads".into()),
        );

        Ok(Self {
            host,
            port,
            backend_url,
            log_dir,
            session_cookie,
            download_dir,
        })
    }
}
