//! Runtime configuration read from the environment.
//!
//! Search order for the catalog: an explicit path (the CLI's `--catalog`),
//! then `LABS_CATALOG_PATH`, then the catalog embedded in the crate.

use crate::catalog::Curriculum;
use anyhow::{Result, bail};
use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

/// Points at an on-disk catalog to use instead of the embedded one.
pub const CATALOG_PATH_ENV: &str = "LABS_CATALOG_PATH";

/// `tracing` env-filter directive for the CLI (e.g. `debug`, `labcatalog=trace`).
pub const LOG_ENV: &str = "LABS_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where the curriculum is loaded from.
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    /// Pick a source from an explicit path or the environment.
    ///
    /// An empty `LABS_CATALOG_PATH` is ignored so shells can unset it with
    /// `LABS_CATALOG_PATH=`.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return CatalogSource::File(path.to_path_buf());
        }
        match env::var(CATALOG_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => CatalogSource::File(PathBuf::from(value)),
            _ => CatalogSource::Builtin,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Builtin => "builtin catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }

    /// Load the curriculum this source names.
    ///
    /// The builtin catalog is shared process-wide; file catalogs are loaded
    /// fresh on each call.
    pub fn load(&self) -> Result<Cow<'static, Curriculum>> {
        match self {
            CatalogSource::Builtin => Ok(Cow::Borrowed(Curriculum::builtin()?)),
            CatalogSource::File(path) => {
                if !path.is_file() {
                    tracing::warn!(path = %path.display(), "catalog override does not exist");
                    bail!("catalog file not found: {}", path.display());
                }
                Ok(Cow::Owned(Curriculum::load(path)?))
            }
        }
    }
}
