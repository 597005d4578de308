use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::policy::{FlappingPolicy, RestartPolicy, StartPolicy};

// ============================================================================
// Watch Specification
// ============================================================================
//
// The complete declarative record submitted to the external supervisor for
// one managed process. Built once during recipe construction; the
// supervisor owns every state transition afterwards.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchSpec {
    /// Unique watch name: the recipe handle.
    pub name: String,
    pub group: String,

    pub start: String,
    /// Absent means the supervisor manages a daemonized lifecycle without
    /// an explicit stop.
    pub stop: Option<String>,
    /// Absent means the supervisor falls back to its own stop/start cycle.
    pub restart: Option<String>,

    pub pid_file: Option<PathBuf>,
    pub log: PathBuf,
    pub err_log: PathBuf,

    /// Credentials and environment, only when explicitly configured.
    pub uid: Option<String>,
    pub gid: Option<String>,
    pub env: Option<BTreeMap<String, String>>,

    pub interval: Duration,
    pub start_grace: Duration,
    pub restart_grace: Duration,

    /// Remove a stale pid file before starting.
    pub clean_pid_file: bool,

    pub start_policy: StartPolicy,
    pub restart_policy: RestartPolicy,
    pub flapping_policy: FlappingPolicy,
}
