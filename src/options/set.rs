use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::merge::deep_merge_maps;
use crate::errors::RecipeError;

// ============================================================================
// Options - Resolved Recipe Configuration
// ============================================================================
//
// An option set is a JSON mapping of option-key to value. Values may be
// scalars or nested mappings; nested mappings combine key-wise when layers
// are merged. Recognized keys get typed accessors below; unrecognized keys
// flow through merging untouched and stay visible to introspection.
//
// Absent keys and explicit nulls both read as unset. A key present with an
// unrepresentable type is a configuration error, never a silent default.
//
// ============================================================================

/// How the pid file for a recipe should be handled.
#[derive(Debug, Clone, PartialEq)]
pub enum PidFileSetting {
    /// `pid_file: false` - the supervisor daemonizes without a tracked pid file.
    Disabled,
    /// An explicit path override.
    Explicit(PathBuf),
    /// Track the pid under `{pid_dir}/{handle}.pid`.
    Default,
}

/// A resolved (or partially resolved) option set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options(pub Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Set a single option, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Deep-merge `overlay` on top of this set. Overlay wins on conflicts.
    pub fn merged(self, overlay: Options) -> Options {
        Options(deep_merge_maps(self.0, overlay.0))
    }

    /// Raw value lookup. Explicit nulls read as unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    /// A string-valued option.
    pub fn str_opt(&self, key: &str) -> Result<Option<&str>, RecipeError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(invalid(key, format!("expected a string, found {other}"))),
        }
    }

    /// A string-valued option that must be present.
    pub fn require_str(&self, key: &str) -> Result<&str, RecipeError> {
        self.str_opt(key)?
            .ok_or_else(|| invalid(key, "option is required".to_string()))
    }

    /// A non-negative integer option.
    pub fn u64_opt(&self, key: &str) -> Result<Option<u64>, RecipeError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| invalid(key, format!("expected a non-negative integer, found {n}"))),
            Some(other) => Err(invalid(
                key,
                format!("expected a non-negative integer, found {other}"),
            )),
        }
    }

    /// A duration option, stored in documents as integral seconds.
    pub fn secs_opt(&self, key: &str) -> Result<Option<Duration>, RecipeError> {
        Ok(self.u64_opt(key)?.map(Duration::from_secs))
    }

    /// A duration option that must be present.
    pub fn require_secs(&self, key: &str) -> Result<Duration, RecipeError> {
        self.secs_opt(key)?
            .ok_or_else(|| invalid(key, "option is required".to_string()))
    }

    /// The `port` option: a number or string, exposed in string form.
    pub fn port(&self) -> Result<Option<String>, RecipeError> {
        match self.get("port") {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(invalid(
                "port",
                format!("expected a number or string, found {other}"),
            )),
        }
    }

    /// The `env` option: a mapping of variable name to scalar value.
    pub fn env_map(&self) -> Result<Option<BTreeMap<String, String>>, RecipeError> {
        let map = match self.get("env") {
            None => return Ok(None),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(invalid("env", format!("expected a mapping, found {other}")))
            }
        };
        let mut env = BTreeMap::new();
        for (name, value) in map {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(invalid(
                        "env",
                        format!("variable `{name}` holds a non-scalar value: {other}"),
                    ))
                }
            };
            env.insert(name.clone(), rendered);
        }
        Ok(Some(env))
    }

    /// The tri-state `pid_file` option.
    pub fn pid_file_setting(&self) -> Result<PidFileSetting, RecipeError> {
        match self.get("pid_file") {
            None | Some(Value::Bool(true)) => Ok(PidFileSetting::Default),
            Some(Value::Bool(false)) => Ok(PidFileSetting::Disabled),
            Some(Value::String(path)) => Ok(PidFileSetting::Explicit(PathBuf::from(path))),
            Some(other) => Err(invalid(
                "pid_file",
                format!("expected a path or false, found {other}"),
            )),
        }
    }
}

fn invalid(key: &str, reason: String) -> RecipeError {
    RecipeError::InvalidOption {
        key: key.to_string(),
        reason,
    }
}

/// The base default table every recipe kind starts from.
///
/// Keys whose default is "unset" are simply absent; merging never needs a
/// null placeholder to override them.
pub fn base_defaults() -> Options {
    let mut defaults = Map::new();
    defaults.insert("process_log_dir".into(), json!("/var/log/god"));
    defaults.insert("pid_dir".into(), json!("/var/run/god"));
    defaults.insert("start_grace_time".into(), json!(10));
    defaults.insert("default_interval".into(), json!(300));
    defaults.insert("mem_usage_interval".into(), json!(600));
    defaults.insert("max_cpu_usage".into(), json!(50));
    defaults.insert("cpu_usage_interval".into(), json!(600));
    Options(defaults)
}
