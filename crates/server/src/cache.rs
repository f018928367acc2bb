use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockWriteGuard};
use std::time::SystemTime;

use crate::dataset::{self, Dataset, DatasetError};

static SHARED: OnceLock<Arc<DatasetCache>> = OnceLock::new();

/// Process-wide cache for the configured dataset path.
///
/// The path is read from [`crate::config::app_config`] on first use.
pub fn shared_cache() -> Arc<DatasetCache> {
    let cache = SHARED.get_or_init(|| {
        Arc::new(DatasetCache::new(
            &crate::config::app_config().dataset.path,
        ))
    });
    Arc::clone(cache)
}

/// Identity of one version of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceFingerprint {
    pub fn of(path: &Path) -> Result<Self, DatasetError> {
        let meta = std::fs::metadata(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

#[derive(Debug, Default)]
struct CacheState {
    current: Option<(SourceFingerprint, Arc<Dataset>)>,
    /// Version whose reload failed; not retried until the source changes again.
    rejected: Option<SourceFingerprint>,
}

/// Lazily loaded dataset, reloaded only when the source file changes.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    state: RwLock<CacheState>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current dataset, loading or reloading it if the source changed.
    ///
    /// A failed reload keeps serving the previous dataset. Only a failure
    /// with nothing loaded yet is returned to the caller. The source is
    /// parsed without holding the lock; readers keep the previous version
    /// until the new one is swapped in.
    pub fn get(&self) -> Result<Arc<Dataset>, DatasetError> {
        let fingerprint = match SourceFingerprint::of(&self.path) {
            Ok(fp) => fp,
            Err(err) => return self.serve_previous(err),
        };

        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(dataset) = Self::fresh(&state, &fingerprint) {
                return Ok(dataset);
            }
        }

        let loaded = dataset::load(&self.path);

        let mut state = self.write_state();
        if let Some(dataset) = Self::fresh(&state, &fingerprint) {
            // Another request finished the same reload first.
            return Ok(dataset);
        }

        match loaded {
            Ok(loaded) => {
                let loaded = Arc::new(loaded);
                tracing::info!(
                    path = %self.path.display(),
                    cases = loaded.len(),
                    "dataset cached"
                );
                state.current = Some((fingerprint, Arc::clone(&loaded)));
                state.rejected = None;
                Ok(loaded)
            }
            Err(err) => match &state.current {
                Some((_, previous)) => {
                    tracing::error!(
                        path = %self.path.display(),
                        error = %err,
                        "dataset reload failed, serving previous version"
                    );
                    let previous = Arc::clone(previous);
                    state.rejected = Some(fingerprint);
                    Ok(previous)
                }
                None => {
                    tracing::error!(path = %self.path.display(), error = %err, "dataset load failed");
                    Err(err)
                }
            },
        }
    }

    /// Drop the cached dataset; the next `get` reloads from the source.
    pub fn invalidate(&self) {
        *self.write_state() = CacheState::default();
        tracing::info!(path = %self.path.display(), "dataset cache invalidated");
    }

    fn fresh(state: &CacheState, fingerprint: &SourceFingerprint) -> Option<Arc<Dataset>> {
        let (cached, dataset) = state.current.as_ref()?;
        if cached == fingerprint || state.rejected.as_ref() == Some(fingerprint) {
            Some(Arc::clone(dataset))
        } else {
            None
        }
    }

    fn serve_previous(&self, err: DatasetError) -> Result<Arc<Dataset>, DatasetError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match &state.current {
            Some((_, previous)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "dataset source unavailable, serving previous version"
                );
                Ok(Arc::clone(previous))
            }
            None => Err(err),
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
