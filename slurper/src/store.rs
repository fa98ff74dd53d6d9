use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::context::SlurpContext;
use crate::fetch::{ByteStream, FetchError};
use crate::post::{ImageRef, Post};

/// Create `path` unless it is already there.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if fs::try_exists(path).await.unwrap_or(false) {
        info!("Folder already exists: {}", path.display());
        return Ok(());
    }

    info!("Making folder: {}", path.display());
    fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Write the post's text to `<root>/<slug>/<slug>.txt`, replacing any
/// previous copy.
pub async fn save_post_text(ctx: &SlurpContext, post: &Post) -> Result<PathBuf> {
    let file_name = post.file_name();
    let subdirectory = file_name.strip_suffix(".txt").unwrap_or(&file_name);
    let folder = ctx.post_dir(subdirectory);

    ensure_dir(&folder).await?;

    let path = folder.join(&file_name);
    fs::write(&path, post.text())
        .await
        .with_context(|| format!("Failed to write post text: {}", path.display()))?;

    debug!("Saved {}", path.display());
    Ok(path)
}

/// Why an image did not make it to disk.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Download one image into `<root>/<slug>/`, streaming chunks to disk.
pub async fn save_post_image(
    ctx: &SlurpContext,
    image: &ImageRef,
    slug: &str,
) -> Result<PathBuf, ImageError> {
    let file_name = image.file_name();
    if file_name.is_empty() {
        return Err(anyhow!("Image URL has no file name: {}", image.source_url).into());
    }
    let dest_path = ctx.post_dir(slug).join(file_name);

    let mut stream = ctx.fetcher().fetch_stream(&image.source_url).await?;

    let mut file = File::create(&dest_path)
        .await
        .with_context(|| format!("Failed to create image file: {}", dest_path.display()))?;

    let written = match copy_stream(&mut stream, &mut file, &dest_path).await {
        Ok(written) => written,
        Err(e) => {
            drop(file);
            discard_partial(&dest_path).await;
            return Err(e);
        }
    };

    debug!("Saved {} ({} bytes)", dest_path.display(), written);
    Ok(dest_path)
}

pub(crate) async fn copy_stream(
    stream: &mut ByteStream,
    file: &mut File,
    dest_path: &Path,
) -> Result<usize, ImageError> {
    let mut written = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write image file: {}", dest_path.display()))?;
        written += chunk.len();
    }
    file.flush()
        .await
        .with_context(|| format!("Failed to flush image file: {}", dest_path.display()))?;
    Ok(written)
}

async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove partial image {}: {}", path.display(), e);
    }
}
