use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the record document inside a data directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Environment variable naming the record document.
pub const DATA_ENV_VAR: &str = "LANGSEARCH_DATA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    /// Resolve the record document from, in order of priority:
    /// 1. An explicit path (from --data)
    /// 2. The LANGSEARCH_DATA environment variable
    /// 3. The XDG data directory (~/.local/share/langsearch/data.json)
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::at(path));
        }
        if let Ok(val) = std::env::var(DATA_ENV_VAR) {
            return Ok(Self::at(val));
        }

        let data_home = xdg::BaseDirectories::with_prefix("langsearch")
            .get_data_home()
            .ok_or_else(|| {
                Error::Config(
                    "could not determine XDG data home directory".into(),
                )
            })?;
        Ok(Self::in_dir(&data_home))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default document inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
