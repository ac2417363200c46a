use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Descriptive record for a stored file, as returned by the backend.
///
/// `is_indexed` reports whether the vector store has picked the file up yet;
/// older backends omit it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    #[serde(default)]
    pub is_indexed: Option<bool>,
}

/// A file picked for upload: the console analog of the browser's file input.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = guess_content_type(&name).to_string();
        Self {
            name,
            content_type,
            bytes,
        }
    }
}

/// A download served by the backend, carrying the stored name and media type.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A backend response captured whole so the gateway can relay it verbatim.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub set_cookies: Vec<String>,
    pub body: Bytes,
}

fn guess_content_type(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") | Some("log") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_known_extensions() {
        assert_eq!(guess_content_type("notes.txt"), "text/plain");
        assert_eq!(guess_content_type("report.PDF"), "application/pdf");
        assert_eq!(
            guess_content_type("archive.tar.gz"),
            "application/octet-stream"
        );
        assert_eq!(guess_content_type("no_extension"), "application/octet-stream");
    }

    #[test]
    fn local_file_carries_guess() {
        let file = LocalFile::new("x.json", b"{}".to_vec());
        assert_eq!(file.content_type, "application/json");
        assert_eq!(file.bytes.len(), 2);
    }

    #[test]
    fn metadata_tolerates_missing_index_flag() {
        let parsed: FileMetadata = serde_json::from_str(
            r#"{"id":"a","name":"x.txt","size":10,"content_type":"text/plain"}"#,
        )
        .unwrap();
        assert_eq!(parsed.is_indexed, None);
        assert_eq!(parsed.size, 10);
    }
}
