// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Local model directory with download-on-miss

use anyhow::{Context, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// A file the model directory must contain and where to fetch it from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    pub file_name: String,
    pub url: String,
}

impl ArtifactSource {
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
        }
    }
}

/// Model directory on local disk
///
/// Files are fetched only when missing. Each download streams into
/// `<file>.part` next to the target and is renamed into place once complete,
/// so an interrupted download never leaves a truncated artifact behind.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    dir: PathBuf,
    client: reqwest::Client,
}

impl ModelArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Makes sure every source is present locally, returning the local paths
    /// in the same order as `sources`
    pub async fn ensure(&self, sources: &[ArtifactSource]) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create model directory {}", self.dir.display()))?;

        let mut paths = Vec::with_capacity(sources.len());
        for source in sources {
            let path = self.path_of(&source.file_name);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                debug!("Model artifact present: {}", path.display());
            } else {
                info!("Downloading {} from {}", source.file_name, source.url);
                let bytes = self.download(&source.url, &path).await?;
                info!("Downloaded {} ({} bytes)", path.display(), bytes);
            }
            paths.push(path);
        }

        Ok(paths)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = part_path(dest);
        match self.stream_to(url, &part).await {
            Ok(bytes) => {
                tokio::fs::rename(&part, dest)
                    .await
                    .with_context(|| format!("Failed to move download into {}", dest.display()))?;
                Ok(bytes)
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to remove partial download {}: {}", part.display(), cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    async fn stream_to(&self, url: &str, part: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?
            .error_for_status()
            .with_context(|| format!("Failed to download {}", url))?;

        let mut file = tokio::fs::File::create(part)
            .await
            .with_context(|| format!("Failed to create {}", part.display()))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.with_context(|| format!("Download of {} interrupted", url))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;

        Ok(written)
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
