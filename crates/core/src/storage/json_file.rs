use crate::domain::state::TenureState;
use crate::error::{Error, Result};
use crate::storage::StateStore;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = "state.json";

/// Tenure state persisted as pretty-printed JSON.
///
/// Saves go to a sibling `*.tmp` file which is then renamed over the target,
/// so a crash mid-write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from(DEFAULT_FILE_NAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<TenureState> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no state file yet; starting empty");
                return Ok(TenureState::default());
            }
            Err(e) => return Err(Error::storage(&self.path, e)),
        };

        let state: TenureState = serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            what: "tenure state",
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            days = state.holdings_by_day.len(),
            tickers = state.first_seen.len(),
            "loaded tenure state"
        );
        Ok(state)
    }

    fn save(&self, state: &TenureState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::storage(parent, e))?;
        }

        let bytes =
            serde_json::to_vec_pretty(state).map_err(|e| Error::storage(&self.path, e.into()))?;

        let tmp = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()
        };
        write().map_err(|e| Error::storage(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::storage(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "saved tenure state");
        Ok(())
    }
}
