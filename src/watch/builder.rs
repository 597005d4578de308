use std::time::Duration;

use crate::errors::RecipeError;
use crate::options::Options;
use crate::recipe::identity::pluralize;
use crate::recipe::layout::FileLayout;

use super::policy::{flapping_policy, restart_policy, start_policy};
use super::spec::WatchSpec;

// ============================================================================
// Watch Assembly
// ============================================================================
//
// Translates resolved options, identity, and planned paths into the one
// declarative WatchSpec the supervisor consumes. Pure: validation and
// construction only, no side effects.
//
// ============================================================================

/// Grace allowed for a restart beyond the start grace when no explicit
/// restart grace is configured.
const RESTART_GRACE_SLACK: Duration = Duration::from_secs(2);

pub fn build_watch(
    options: &Options,
    name: &str,
    handle: &str,
    layout: &FileLayout,
) -> Result<WatchSpec, RecipeError> {
    let start = options
        .str_opt("start_command")?
        .ok_or(RecipeError::MissingStartCommand)?
        .to_owned();
    let stop = options.str_opt("stop_command")?.map(str::to_owned);

    // An explicit restart wins; otherwise a configured stop composes into
    // stop, a one-second pause, then start. With neither, the supervisor
    // cycles the process itself.
    let restart = match options.str_opt("restart_command")? {
        Some(restart) => Some(restart.to_owned()),
        None => stop
            .as_deref()
            .map(|stop| format!("{stop} && sleep 1 && {start}")),
    };

    let group = match options.str_opt("monitor_group")? {
        Some(group) => group.to_owned(),
        None => pluralize(name),
    };

    let start_grace = options.require_secs("start_grace_time")?;
    let restart_grace = match options.secs_opt("restart_grace_time")? {
        Some(grace) => grace,
        None => start_grace + RESTART_GRACE_SLACK,
    };

    Ok(WatchSpec {
        name: handle.to_owned(),
        group,
        start,
        stop,
        restart,
        pid_file: layout.pid_file.clone(),
        log: layout.log_file.clone(),
        err_log: layout.err_log_file.clone(),
        uid: options.str_opt("uid")?.map(str::to_owned),
        gid: options.str_opt("gid")?.map(str::to_owned),
        env: options.env_map()?,
        interval: options.require_secs("default_interval")?,
        start_grace,
        restart_grace,
        clean_pid_file: true,
        start_policy: start_policy(options)?,
        restart_policy: restart_policy(options)?,
        flapping_policy: flapping_policy(options)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::base_defaults;
    use serde_json::json;

    fn mongrel_options() -> Options {
        base_defaults()
            .with("start_command", "mongrel_rails start")
            .with("port", 8000)
    }

    fn layout_for(options: &Options, handle: &str) -> FileLayout {
        FileLayout::plan(options, handle).unwrap()
    }

    #[test]
    fn test_missing_start_command_is_rejected() {
        let options = base_defaults();
        let layout = layout_for(&options, "mongrel");
        assert!(matches!(
            build_watch(&options, "mongrel", "mongrel", &layout),
            Err(RecipeError::MissingStartCommand)
        ));
    }

    #[test]
    fn test_no_stop_means_no_restart_composition() {
        let options = mongrel_options();
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.stop, None);
        assert_eq!(watch.restart, None);
    }

    #[test]
    fn test_stop_composes_the_restart_sequence() {
        let options = mongrel_options().with("stop_command", "mongrel_rails stop");
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(
            watch.restart.as_deref(),
            Some("mongrel_rails stop && sleep 1 && mongrel_rails start")
        );
    }

    #[test]
    fn test_explicit_restart_override_wins() {
        let options = mongrel_options()
            .with("stop_command", "mongrel_rails stop")
            .with("restart_command", "mongrel_rails restart");
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.restart.as_deref(), Some("mongrel_rails restart"));
    }

    #[test]
    fn test_group_defaults_to_pluralized_name() {
        let options = mongrel_options();
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.group, "mongrels");

        let options = mongrel_options().with("monitor_group", "app-servers");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.group, "app-servers");
    }

    #[test]
    fn test_restart_grace_defaults_to_start_grace_plus_two() {
        let options = mongrel_options();
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.start_grace, Duration::from_secs(10));
        assert_eq!(watch.restart_grace, Duration::from_secs(12));
    }

    #[test]
    fn test_explicit_restart_grace_is_never_overridden() {
        let options = mongrel_options().with("restart_grace_time", 7);
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.restart_grace, Duration::from_secs(7));
    }

    #[test]
    fn test_credentials_pass_through_only_when_set() {
        let options = mongrel_options();
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.uid, None);
        assert_eq!(watch.gid, None);
        assert_eq!(watch.env, None);

        let options = mongrel_options()
            .with("uid", "deploy")
            .with("gid", "deploy")
            .with("env", json!({"RAILS_ENV": "production"}));
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert_eq!(watch.uid.as_deref(), Some("deploy"));
        assert_eq!(watch.gid.as_deref(), Some("deploy"));
        assert_eq!(
            watch.env.unwrap().get("RAILS_ENV").map(String::as_str),
            Some("production")
        );
    }

    #[test]
    fn test_clean_pid_file_is_always_requested() {
        let options = mongrel_options();
        let layout = layout_for(&options, "mongrel_8000");
        let watch = build_watch(&options, "mongrel", "mongrel_8000", &layout).unwrap();
        assert!(watch.clean_pid_file);
    }
}
