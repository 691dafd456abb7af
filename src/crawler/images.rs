//! Image download into the assets directory

use crate::crawler::extractor::ImageCandidate;
use crate::crawler::fetcher::Fetcher;
use crate::record::ImageRef;
use crate::FetchError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Why a single image was left out of a page record
#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Derives the file name an image is stored under
///
/// Uses the last path segment of the URL when it looks like a file name,
/// otherwise `image_<8 hex chars of SHA-256(url)>.jpg`.
///
/// # Examples
///
/// ```
/// use zeiler_migrate::crawler::image_filename;
///
/// assert_eq!(image_filename("https://www.zeiler.me/bilder/foto.png"), "foto.png");
/// assert!(image_filename("https://lh3.googleusercontent.com/abc").starts_with("image_"));
/// ```
pub fn image_filename(image_url: &str) -> String {
    let segment = Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default();

    if segment.contains('.') && !segment.starts_with('.') {
        return segment;
    }

    let digest = Sha256::digest(image_url.as_bytes());
    format!("image_{}.jpg", &hex::encode(digest)[..8])
}

/// Downloads one image and writes it to `assets_dir`
///
/// The directory is created if needed; an existing file with the same name
/// is overwritten.
pub async fn download_image(
    fetcher: &Fetcher,
    image: &ImageCandidate,
    assets_dir: &Path,
) -> Result<ImageRef, ImageError> {
    let bytes = fetcher.fetch(&image.url).await?;

    let filename = image_filename(&image.url);
    let path = assets_dir.join(&filename);

    tokio::fs::create_dir_all(assets_dir)
        .await
        .map_err(|source| ImageError::Write {
            path: assets_dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ImageError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!("Downloaded image: {}", filename);

    Ok(ImageRef {
        src: filename,
        alt: image.alt.clone(),
        original_url: image.url.clone(),
    })
}
