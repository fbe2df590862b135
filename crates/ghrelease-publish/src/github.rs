use std::fs::File;
use std::path::Path;

use ghrelease_core::{Error, GithubConfig};

use crate::request::{Request, RequestBody};

/// Uploads one file as a release asset named after its base name.
///
/// Returns the asset name on success.
pub fn send_file(request: &Request, config: &GithubConfig, path: &Path) -> Result<String, Error> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let body = match file.metadata() {
        Ok(metadata) => RequestBody::sized(file, metadata.len()),
        Err(_) => RequestBody::streamed(file),
    };

    let name = asset_name(path);
    let url_path = assets_path(config);
    let authorization = format!("token {}", config.auth());
    let headers = [
        ("Authorization", authorization.as_str()),
        ("Content-Type", content_type_for_path(path)),
    ];

    let response = request
        .process_post(&url_path, &[("name", name.as_str())], &headers, body)
        .map_err(|source| Error::Upload {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
    drop(response);

    tracing::info!(asset = %name, path = %path.display(), "uploaded asset");
    Ok(name)
}

pub fn assets_path(config: &GithubConfig) -> String {
    format!(
        "repos/{}/releases/{}/assets",
        config.repository(),
        config.release_id()
    )
}

pub fn asset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn content_type_for_path(path: &Path) -> &'static str {
    let name = path.to_string_lossy();
    if name.ends_with(".zip") {
        "application/zip"
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") || name.ends_with(".gz") {
        "application/gzip"
    } else if name.ends_with(".json") {
        "application/json"
    } else if name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
