use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tar::Archive;
use tracing::{debug, info};
use xz2::read::XzDecoder;
use zip::ZipArchive;

use crate::error::{Error, IoContext, Result};

const DEFAULT_USER_AGENT: &str = concat!("modbuild/", env!("CARGO_PKG_VERSION"));

/// Downloads a remote resource to a file, byte for byte.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Blocking HTTP(S) downloader.
#[derive(Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = Client::builder().build().map_err(|err| Error::Download {
            url: String::new(),
            message: format!("failed to build HTTP client: {err}"),
        })?;
        Ok(Self { http })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        info!("Downloading {url}");
        let download_error = |message: String| Error::Download {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .http
            .get(url)
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .send()
            .map_err(|err| download_error(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .unwrap_or_else(|_| "<unavailable>".to_string());
            return Err(download_error(format!("server returned {status}: {body}")));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }

        let temp_path = dest.with_extension("download");
        let mut file = File::create(&temp_path).at(&temp_path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];

        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|err| download_error(format!("failed reading response: {err}")))?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read]).at(&temp_path)?;
            hasher.update(&buffer[..read]);
        }
        file.flush().at(&temp_path)?;
        drop(file);

        fs::rename(&temp_path, dest).at(dest)?;
        debug!(
            sha256 = %hex::encode(hasher.finalize()),
            "Downloaded {}",
            dest.display()
        );
        Ok(())
    }
}

/// Unpack a zip or tar archive into `dest`. Other files are copied as-is.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let filename = archive_path
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let bad_archive = |message: String| {
        Error::io(
            archive_path,
            io::Error::new(io::ErrorKind::InvalidData, message),
        )
    };

    fs::create_dir_all(dest).at(dest)?;

    if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
        let file = File::open(archive_path).at(archive_path)?;
        Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .at(archive_path)?;
    } else if filename.ends_with(".tar.xz") || filename.ends_with(".txz") {
        let file = File::open(archive_path).at(archive_path)?;
        Archive::new(XzDecoder::new(file))
            .unpack(dest)
            .at(archive_path)?;
    } else if filename.ends_with(".tar") {
        let file = File::open(archive_path).at(archive_path)?;
        Archive::new(file).unpack(dest).at(archive_path)?;
    } else if filename.ends_with(".zip") {
        let file = File::open(archive_path).at(archive_path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|err| bad_archive(format!("unreadable zip: {err}")))?;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|err| bad_archive(format!("unreadable zip entry #{index}: {err}")))?;

            let Some(enclosed) = entry.enclosed_name().map(|path| dest.join(path)) else {
                continue;
            };

            if entry.name().ends_with('/') {
                fs::create_dir_all(&enclosed).at(&enclosed)?;
            } else {
                if let Some(parent) = enclosed.parent() {
                    fs::create_dir_all(parent).at(parent)?;
                }
                let mut outfile = File::create(&enclosed).at(&enclosed)?;
                io::copy(&mut entry, &mut outfile).at(&enclosed)?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    if let Some(mode) = entry.unix_mode() {
                        fs::set_permissions(&enclosed, fs::Permissions::from_mode(mode))
                            .at(&enclosed)?;
                    }
                }
            }
        }
    } else {
        let name = archive_path
            .file_name()
            .ok_or_else(|| bad_archive("archive path has no file name".to_string()))?;
        let target = dest.join(name);
        fs::copy(archive_path, &target).at(&target)?;
    }

    Ok(())
}
