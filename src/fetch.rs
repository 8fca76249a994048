use super::config::SourceDescriptor;
use super::error::FetchError;
use super::DOWNLOAD_URL;
use std::fs;
use std::path::{Path, PathBuf};

/// Status and raw body of a GET request.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// The HTTP layer used by the fetcher.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Response, FetchError>;
}

/// Blocking client; any status code comes back as a response, only I/O problems are errors.
#[derive(Debug, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let network_err = |err: ureq::Error| FetchError::Network {
            url: url.to_string(),
            source: err,
        };
        let mut response = ureq::get(url)
            .config()
            .http_status_as_error(false)
            .build()
            .call()
            .map_err(network_err)?;
        let status = response.status().as_u16();
        // no size cap, the body is written out verbatim
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(network_err)?;
        Ok(Response { status, body })
    }
}

pub fn download_url(identifier: &str) -> String {
    format!("{}?id={}&export=download", DOWNLOAD_URL, identifier)
}

/// Resolves the source key through `lookup`, downloads the log
/// and writes it verbatim into `data_dir` (created if needed).
/// Only a 200 response produces a file.
pub fn fetch(
    transport: &dyn Transport,
    lookup: &dyn Fn(&str) -> Option<String>,
    source: &SourceDescriptor,
    data_dir: &Path,
) -> Result<PathBuf, FetchError> {
    fs::create_dir_all(data_dir).map_err(|e| FetchError::Write {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    let identifier = lookup(&source.key).ok_or_else(|| FetchError::MissingIdentifier {
        key: source.key.clone(),
    })?;
    let url = download_url(&identifier);
    log::debug!("requesting {} for {}", url, source.name);
    let response = transport.get(&url)?;
    if response.status != 200 {
        return Err(FetchError::Status {
            filename: source.filename.clone(),
            status: response.status,
        });
    }
    let path = data_dir.join(&source.filename);
    fs::write(&path, &response.body).map_err(|e| FetchError::Write {
        path: path.clone(),
        source: e,
    })?;
    log::info!(
        "file {} downloaded successfully to {} ({} bytes)",
        source.filename,
        data_dir.display(),
        response.body.len()
    );
    Ok(path)
}
