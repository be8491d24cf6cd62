use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file written by a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub size: u64,
}

/// Write `contents` to `path`, creating parent directories as needed.
pub async fn write_artifact(path: &Path, contents: &[u8]) -> io::Result<Artifact> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;

    Ok(Artifact {
        path: path.to_path_buf(),
        size: contents.len() as u64,
    })
}
