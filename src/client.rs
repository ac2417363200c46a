use bytes::Bytes;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, SET_COOKIE},
    multipart,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    error::AppError,
    models::files::{DownloadedFile, FileMetadata, LocalFile, RelayedResponse},
};

/// The caller's ambient session, made explicit: a cookie pair attached to
/// every file-service call.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    session_cookie: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_cookie(cookie: impl Into<String>) -> Self {
        Self {
            session_cookie: Some(cookie.into()),
        }
    }
}

/// The backend file service contract, as consumed by the files page.
#[allow(async_fn_in_trait)]
pub trait FileService {
    async fn list(&self) -> Result<Vec<FileMetadata>, AppError>;
    async fn upload(&self, file: LocalFile) -> Result<FileMetadata, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn download(&self, id: &str) -> Result<DownloadedFile, AppError>;
}

/// HTTP implementation of the backend contract.
pub struct HttpFileService {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpFileService {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_credentials(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials.session_cookie {
            Some(cookie) => request.header(COOKIE, cookie.clone()),
            None => request,
        }
    }

    /// Forward a registration payload to the backend, unauthenticated, and
    /// capture the response whole for verbatim relay.
    pub async fn register(&self, body: &Value) -> Result<RelayedResponse, AppError> {
        let response = self
            .http
            .post(self.endpoint("/auth/register"))
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response.bytes().await?;

        Ok(RelayedResponse {
            status,
            content_type,
            set_cookies,
            body,
        })
    }
}

impl FileService for HttpFileService {
    async fn list(&self) -> Result<Vec<FileMetadata>, AppError> {
        let request = self.with_credentials(self.http.get(self.endpoint("/files")));
        let response = expect_success(request.send().await?).await?;
        Ok(response.json::<Vec<FileMetadata>>().await?)
    }

    async fn upload(&self, file: LocalFile) -> Result<FileMetadata, AppError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let request = self.with_credentials(self.http.post(self.endpoint("/files")));
        let response = expect_success(request.multipart(form).send().await?).await?;
        Ok(response.json::<FileMetadata>().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("/files/{id}"));
        let request = self.with_credentials(self.http.delete(url));
        expect_success(request.send().await?).await?;
        Ok(())
    }

    async fn download(&self, id: &str) -> Result<DownloadedFile, AppError> {
        let url = self.endpoint(&format!("/files/{id}/download"));
        let request = self.with_credentials(self.http.get(url));
        let response = expect_success(request.send().await?).await?;

        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_filename)
            .unwrap_or_else(|| id.to_string());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes: Bytes = response.bytes().await?;

        Ok(DownloadedFile {
            name,
            content_type,
            bytes,
        })
    }
}

async fn expect_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .and_then(|value| value.as_str().map(str::to_string));
    warn!(
        status = status.as_u16(),
        detail = detail.as_deref(),
        "backend call failed"
    );
    Err(AppError::Backend {
        status: status.as_u16(),
        detail,
    })
}

fn disposition_filename(header: &str) -> Option<String> {
    let needle = "filename=";
    let position = header.find(needle)?;
    let value = header[position + needle.len()..].trim();
    let value = value.split(';').next().unwrap_or(value).trim();
    let value = value.trim_matches('"');
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_disposition_filename() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="x report.txt""#),
            Some("x report.txt".to_string())
        );
    }

    #[test]
    fn parses_bare_disposition_filename() {
        assert_eq!(
            disposition_filename("attachment; filename=y.txt; size=20"),
            Some("y.txt".to_string())
        );
    }

    #[test]
    fn rejects_missing_filename() {
        assert_eq!(disposition_filename("inline"), None);
        assert_eq!(disposition_filename(r#"attachment; filename="""#), None);
    }
}
