use std::path::{Path, PathBuf};

use crate::errors::RecipeError;
use crate::options::{Options, PidFileSetting};

// ============================================================================
// File Layout Planning
// ============================================================================
//
// Computes the log and pid paths for one recipe instance and provisions
// their parent directories. A recipe whose directories cannot be created
// must not be activated, so provisioning failure is fatal and not retried.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FileLayout {
    pub log_file: PathBuf,
    /// Same as `log_file` unless the `err_log_file` option overrides it;
    /// stdout and stderr share one stream by default.
    pub err_log_file: PathBuf,
    /// `None` means the supervisor daemonizes without a tracked pid file.
    pub pid_file: Option<PathBuf>,
}

impl FileLayout {
    pub fn plan(options: &Options, handle: &str) -> Result<Self, RecipeError> {
        let log_dir = options.require_str("process_log_dir")?;
        let log_file = Path::new(log_dir).join(format!("{handle}.log"));

        let err_log_file = match options.str_opt("err_log_file")? {
            Some(path) => PathBuf::from(path),
            None => log_file.clone(),
        };

        let pid_file = match options.pid_file_setting()? {
            PidFileSetting::Disabled => None,
            PidFileSetting::Explicit(path) => Some(path),
            PidFileSetting::Default => {
                let pid_dir = options.require_str("pid_dir")?;
                Some(Path::new(pid_dir).join(format!("{handle}.pid")))
            }
        };

        Ok(Self {
            log_file,
            err_log_file,
            pid_file,
        })
    }

    /// Create the parent directory of every tracked path. Idempotent: an
    /// already-present directory is not an error.
    pub fn ensure_directories(&self) -> Result<(), RecipeError> {
        let tracked = [
            Some(&self.log_file),
            Some(&self.err_log_file),
            self.pid_file.as_ref(),
        ];
        for path in tracked.into_iter().flatten() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| RecipeError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
                tracing::debug!(dir = %parent.display(), "Provisioned directory");
            }
        }
        Ok(())
    }
}
