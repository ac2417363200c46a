use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    client::FileService,
    models::files::{DownloadedFile, LocalFile},
    page::FilesPage,
    view::render_table,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Upload,
    Delete(String),
    Download(String),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let argument = parts.next();

        match (verb, argument) {
            ("refresh", None) | ("ls", None) | ("list", None) => Ok(Command::Refresh),
            ("upload", None) => Ok(Command::Upload),
            ("delete", Some(id)) | ("rm", Some(id)) => Ok(Command::Delete(id.to_string())),
            ("download", Some(id)) | ("get", Some(id)) => Ok(Command::Download(id.to_string())),
            ("help", None) => Ok(Command::Help),
            ("quit", None) | ("exit", None) => Ok(Command::Quit),
            ("delete", None) | ("rm", None) => Err("usage: delete <id>".into()),
            ("download", None) | ("get", None) => Err("usage: download <id>".into()),
            ("", _) => Err(String::new()),
            (other, _) => Err(format!("unknown command: {other} (try help)")),
        }
    }
}

const HELP: &str = "commands:\n  \
    refresh            reload the file list\n  \
    upload             pick a local file and upload it\n  \
    delete <id>        delete a file\n  \
    download <id>      fetch a file into the download directory\n  \
    help               show this text\n  \
    quit               leave";

/// Drive the files page from stdin until `quit` or end of input.
pub async fn run<S: FileService>(
    page: &mut FilesPage<S>,
    download_dir: &Path,
) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Mount: load the listing once before the first prompt.
    page.refresh().await;
    drain_notices(page);
    println!("{}", render_table(page.files()));

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{message}");
                }
                continue;
            }
        };

        match command {
            Command::Refresh => {
                page.refresh().await;
                drain_notices(page);
                println!("{}", render_table(page.files()));
            }
            Command::Upload => {
                let selection = pick_file(page, &mut lines).await?;
                page.submit_upload(selection).await;
                drain_notices(page);
                println!("{}", render_table(page.files()));
            }
            Command::Delete(id) => {
                page.delete(&id).await;
                drain_notices(page);
                println!("{}", render_table(page.files()));
            }
            Command::Download(id) => match page.download(&id).await {
                Ok(downloaded) => {
                    let landed = save_download(download_dir, &downloaded).await?;
                    println!("saved {}", landed.display());
                }
                Err(err) => println!("download failed: {err}"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(()),
        }
    }
}

/// The upload dialog: prompt for a path, empty input means nothing selected.
async fn pick_file<S: FileService>(
    page: &mut FilesPage<S>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> io::Result<Option<LocalFile>> {
    page.open_upload_dialog();
    prompt("file to upload (empty to cancel): ")?;

    let Some(line) = lines.next_line().await? else {
        page.close_upload_dialog();
        return Ok(None);
    };
    let path = line.trim();
    if path.is_empty() {
        return Ok(None);
    }

    match fs::read(path).await {
        Ok(bytes) => {
            let name = Path::new(path)
                .file_name()
                .and_then(|value| value.to_str())
                .unwrap_or("upload.bin");
            Ok(Some(LocalFile::new(name, bytes)))
        }
        Err(err) => {
            println!("cannot read {path}: {err}");
            page.close_upload_dialog();
            Ok(None)
        }
    }
}

/// Write a downloaded file under `dir`, with the served name made safe for
/// the local filesystem.
pub async fn save_download(dir: &Path, downloaded: &DownloadedFile) -> io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let target = dir.join(sanitize_filename(&downloaded.name));
    fs::write(&target, &downloaded.bytes).await?;
    Ok(target)
}

fn sanitize_filename(name: &str) -> String {
    let fallback = "download.bin";
    let file_name = Path::new(name)
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or(fallback);
    let sanitized: String = file_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        fallback.into()
    } else {
        sanitized
    }
}

fn drain_notices<S: FileService>(page: &mut FilesPage<S>) {
    for notice in page.take_notices() {
        println!("! {}", notice.message());
    }
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(Command::parse("refresh"), Ok(Command::Refresh));
        assert_eq!(Command::parse("ls"), Ok(Command::Refresh));
        assert_eq!(Command::parse("upload"), Ok(Command::Upload));
        assert_eq!(
            Command::parse("delete abc"),
            Ok(Command::Delete("abc".into()))
        );
        assert_eq!(
            Command::parse("  download  abc  "),
            Ok(Command::Download("abc".into()))
        );
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_missing_arguments_and_unknown_verbs() {
        assert!(Command::parse("delete").is_err());
        assert!(Command::parse("download").is_err());
        assert!(Command::parse("froth").is_err());
        assert_eq!(Command::parse("   "), Err(String::new()));
    }

    #[test]
    fn sanitizes_served_filenames() {
        assert_eq!(sanitize_filename("report.txt"), "report.txt");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("a b?c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_filename(""), "download.bin");
    }

    #[tokio::test]
    async fn lands_download_under_directory() {
        let dir = tempfile::tempdir().unwrap();
        let downloaded = DownloadedFile {
            name: "notes/../x report.txt".into(),
            content_type: "text/plain".into(),
            bytes: Bytes::from_static(b"hello"),
        };

        let landed = save_download(dir.path(), &downloaded).await.unwrap();
        assert_eq!(landed.file_name().unwrap(), "x_report.txt");
        assert_eq!(std::fs::read(&landed).unwrap(), b"hello");
    }
}
