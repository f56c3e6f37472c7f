use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::EngineError;

use super::{LoadReport, Result, StateSnapshot, StorageBackend};

const SUBSCRIPTIONS_FILE: &str = "subscriptions.json";
const USER_FILE: &str = "user.json";
const SPENDING_HISTORY_FILE: &str = "spending_history.json";
const TMP_SUFFIX: &str = "tmp";
const APP_DIR: &str = "subtrack";

/// File-per-blob JSON backend. Each of the three state blobs lives in its own
/// file under the root directory, written atomically via a staged temp file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => default_root()?,
        };
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Reads one blob. Absent file is a clean `None`; a file that fails to
    /// parse is also `None` but records a warning so startup can proceed on
    /// defaults instead of aborting.
    fn read_blob<T: DeserializeOwned>(&self, file: &str, warnings: &mut Vec<String>) -> Option<T> {
        let path = self.blob_path(file);
        if !path.exists() {
            return None;
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) => {
                let message = format!("could not read `{}`: {}", path.display(), err);
                tracing::warn!("{message}");
                warnings.push(message);
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                let message = format!("malformed payload in `{}`: {}", path.display(), err);
                tracing::warn!("{message}");
                warnings.push(message);
                None
            }
        }
    }

    fn write_blob<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.blob_path(file);
        let json = serde_json::to_string_pretty(value)?;
        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<LoadReport> {
        let mut warnings = Vec::new();
        let subscriptions = self.read_blob(SUBSCRIPTIONS_FILE, &mut warnings);
        let user = self.read_blob(USER_FILE, &mut warnings);
        let spending_history = self.read_blob(SPENDING_HISTORY_FILE, &mut warnings);
        Ok(LoadReport {
            subscriptions,
            user,
            spending_history,
            warnings,
        })
    }

    fn save(&self, state: &StateSnapshot<'_>) -> Result<()> {
        ensure_dir(&self.root)?;
        self.write_blob(SUBSCRIPTIONS_FILE, &state.subscriptions)?;
        self.write_blob(USER_FILE, state.user)?;
        self.write_blob(SPENDING_HISTORY_FILE, &state.spending_history)?;
        Ok(())
    }
}

fn default_root() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| EngineError::Storage("unable to resolve a data directory".into()))
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
