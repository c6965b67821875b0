use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

/// Persisted application state (state.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// ytcast pairing code / device id set from the UI
    #[serde(default)]
    pub ytcast_code: String,
}

/// State storage layer - keeps state.json and an in-memory copy in sync
#[derive(Clone)]
pub struct Storage {
    path: PathBuf,
    state: Arc<RwLock<State>>,
}

impl Storage {
    /// Open the state file. A missing or empty file yields the default state;
    /// an unreadable one is logged and replaced by the default on next save.
    pub async fn open(path: PathBuf) -> Self {
        let state = match load_state(&path).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Failed to load state from {}: {}", path.display(), e);
                State::default()
            }
        };

        Self {
            path,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Stored ytcast code, if any
    pub async fn ytcast_code(&self) -> Option<String> {
        let state = self.state.read().await;
        (!state.ytcast_code.is_empty()).then(|| state.ytcast_code.clone())
    }

    /// Store a new ytcast code and persist it
    pub async fn set_ytcast_code(&self, code: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let mut updated = state.clone();
        updated.ytcast_code = code.to_string();

        save_state(&self.path, &updated).await?;
        *state = updated;

        tracing::info!("Stored ytcast code in {}", self.path.display());
        Ok(())
    }
}

/// Read state from `path`. A missing or empty file is the default state.
pub async fn load_state(path: &Path) -> Result<State> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(State::default()),
        Err(e) => return Err(e.into()),
    };

    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(State::default());
    }

    Ok(serde_json::from_slice(&data)?)
}

/// Write state to `path` atomically (temp file + rename)
pub async fn save_state(path: &Path, state: &State) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_state_dir(parent).await?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let json = serde_json::to_vec_pretty(state)?;

    if let Err(e) = write_private(&tmp, &json).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    Ok(())
}

async fn create_state_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o750);
    builder.create(dir).await
}

async fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
