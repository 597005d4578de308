use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::RecipeError;
use crate::options::Options;

// ============================================================================
// Supervision Policy Fragments
// ============================================================================
//
// Declarative parameters the supervisor interprets at runtime. Each builder
// here is a pure function of the resolved options returning an immutable
// struct; nothing executes at build time.
//
// ============================================================================

const FLAPPING_TIMES: u32 = 5;
const FLAPPING_WINDOW: Duration = Duration::from_secs(15 * 60);
const FLAPPING_RETRY_IN: Duration = Duration::from_secs(30 * 60);
const FLAPPING_RETRY_TIMES: u32 = 5;
const FLAPPING_RETRY_WINDOW: Duration = Duration::from_secs(4 * 60 * 60);

/// Lifecycle transitions the flapping rule counts as trigger events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Start,
    Restart,
}

/// Watch states a policy can tell the supervisor to transition into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WatchState {
    Unmonitored,
}

/// Start detection: poll "process not running" and run the start command
/// when it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartPolicy {
    /// Poll cadence for the not-running check.
    pub poll_interval: Duration,
    /// Notification target attached to the process-exits hook under the
    /// up-state start transition. Whether the supervisor fires it on every
    /// exit or only on exits during a start-triggered transition is the
    /// supervisor's runtime disposition; only the attachment point is
    /// declared here.
    pub crash_notify: Option<String>,
}

/// How many threshold breaches fire a restart watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OccurrenceRule {
    /// Fire on `hits` breaches out of the last `window` samples.
    Ratio { hits: u32, window: u32 },
    /// Fire on a simple breach count.
    Count(u32),
}

/// One resource-threshold restart watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdWatch {
    pub interval: Duration,
    pub above: u64,
    pub occurrences: OccurrenceRule,
    pub notify: Option<String>,
}

/// Resource-threshold restart rules. A watcher is present iff its cap
/// option is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestartPolicy {
    pub memory: Option<ThresholdWatch>,
    pub cpu: Option<ThresholdWatch>,
}

/// Escalation rule for repeated start/restart cycling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlappingPolicy {
    pub triggers: Vec<LifecycleEvent>,
    /// Trigger occurrences within `within` that count as flapping.
    pub times: u32,
    pub within: Duration,
    pub transition: WatchState,
    /// Re-enable monitoring this long after the transition.
    pub retry_in: Duration,
    /// If flapping recurs `retry_times` times within `retry_within`, the
    /// supervisor's own disposition applies; only the thresholds are
    /// supplied here.
    pub retry_times: u32,
    pub retry_within: Duration,
    pub notify: Option<String>,
}

/// Build the start-detection policy.
pub fn start_policy(options: &Options) -> Result<StartPolicy, RecipeError> {
    let poll_interval = match options.secs_opt("start_interval")? {
        Some(interval) => interval,
        None => options.require_secs("default_interval")?,
    };
    Ok(StartPolicy {
        poll_interval,
        crash_notify: options.str_opt("crash_notify")?.map(str::to_owned),
    })
}

/// Build the resource-threshold restart policy. Memory and CPU watchers are
/// independently optional and independently configured.
pub fn restart_policy(options: &Options) -> Result<RestartPolicy, RecipeError> {
    let notify = options.str_opt("restart_notify")?.map(str::to_owned);

    let memory = match options.u64_opt("max_mem_usage")? {
        Some(above) => Some(ThresholdWatch {
            interval: options.require_secs("mem_usage_interval")?,
            above,
            occurrences: OccurrenceRule::Ratio { hits: 3, window: 5 },
            notify: notify.clone(),
        }),
        None => None,
    };

    let cpu = match options.u64_opt("max_cpu_usage")? {
        Some(above) => Some(ThresholdWatch {
            interval: options.require_secs("cpu_usage_interval")?,
            above,
            occurrences: OccurrenceRule::Count(5),
            notify,
        }),
        None => None,
    };

    Ok(RestartPolicy { memory, cpu })
}

/// Build the flapping escalation rule.
pub fn flapping_policy(options: &Options) -> Result<FlappingPolicy, RecipeError> {
    Ok(FlappingPolicy {
        triggers: vec![LifecycleEvent::Start, LifecycleEvent::Restart],
        times: FLAPPING_TIMES,
        within: options
            .secs_opt("flapping_window")?
            .unwrap_or(FLAPPING_WINDOW),
        transition: WatchState::Unmonitored,
        retry_in: options
            .secs_opt("flapping_retry_in")?
            .unwrap_or(FLAPPING_RETRY_IN),
        retry_times: FLAPPING_RETRY_TIMES,
        retry_within: FLAPPING_RETRY_WINDOW,
        notify: options.str_opt("flapping_notify")?.map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::base_defaults;

    #[test]
    fn test_start_poll_falls_back_to_default_interval() {
        let policy = start_policy(&base_defaults()).unwrap();
        assert_eq!(policy.poll_interval, Duration::from_secs(300));

        let policy = start_policy(&base_defaults().with("start_interval", 30)).unwrap();
        assert_eq!(policy.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_explicit_start_interval_is_never_overridden() {
        let options = base_defaults()
            .with("start_interval", 45)
            .with("default_interval", 600);
        let policy = start_policy(&options).unwrap();
        assert_eq!(policy.poll_interval, Duration::from_secs(45));
    }

    #[test]
    fn test_memory_watcher_present_iff_cap_is_set() {
        let policy = restart_policy(&base_defaults()).unwrap();
        assert!(policy.memory.is_none());

        let policy = restart_policy(&base_defaults().with("max_mem_usage", 157_286_400)).unwrap();
        let memory = policy.memory.unwrap();
        assert_eq!(memory.above, 157_286_400);
        assert_eq!(memory.interval, Duration::from_secs(600));
        assert_eq!(memory.occurrences, OccurrenceRule::Ratio { hits: 3, window: 5 });
    }

    #[test]
    fn test_cpu_only_policy_has_exactly_one_watcher() {
        // max_cpu_usage is set by the base defaults, max_mem_usage is not
        let policy = restart_policy(&base_defaults()).unwrap();
        assert!(policy.memory.is_none());
        let cpu = policy.cpu.unwrap();
        assert_eq!(cpu.above, 50);
        assert_eq!(cpu.occurrences, OccurrenceRule::Count(5));
    }

    #[test]
    fn test_unset_cpu_cap_disables_the_watcher() {
        let options = base_defaults().with("max_cpu_usage", serde_json::Value::Null);
        let policy = restart_policy(&options).unwrap();
        assert!(policy.cpu.is_none());
    }

    #[test]
    fn test_restart_notify_attaches_to_each_present_watcher() {
        let options = base_defaults()
            .with("max_mem_usage", 1024)
            .with("restart_notify", "ops");
        let policy = restart_policy(&options).unwrap();
        assert_eq!(policy.memory.unwrap().notify.as_deref(), Some("ops"));
        assert_eq!(policy.cpu.unwrap().notify.as_deref(), Some("ops"));
    }

    #[test]
    fn test_flapping_defaults() {
        let policy = flapping_policy(&base_defaults()).unwrap();
        assert_eq!(
            policy.triggers,
            vec![LifecycleEvent::Start, LifecycleEvent::Restart]
        );
        assert_eq!(policy.times, 5);
        assert_eq!(policy.within, Duration::from_secs(900));
        assert_eq!(policy.transition, WatchState::Unmonitored);
        assert_eq!(policy.retry_in, Duration::from_secs(1800));
        assert_eq!(policy.retry_times, 5);
        assert_eq!(policy.retry_within, Duration::from_secs(14_400));
        assert_eq!(policy.notify, None);
    }

    #[test]
    fn test_flapping_windows_are_tunable() {
        let options = base_defaults()
            .with("flapping_window", 120)
            .with("flapping_retry_in", 240)
            .with("flapping_notify", "pager");
        let policy = flapping_policy(&options).unwrap();
        assert_eq!(policy.within, Duration::from_secs(120));
        assert_eq!(policy.retry_in, Duration::from_secs(240));
        assert_eq!(policy.notify.as_deref(), Some("pager"));
    }
}
