//! 規則ごとのプロファイラ

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Counters for one completion rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleStats {
    pub name: String,
    pub calls: u64,
    pub derived: u64,
    pub elapsed_nanos: u64,
}

impl RuleStats {
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }
}

/// Observes rule applications; has no effect on the derived facts
#[derive(Debug, Clone, Default)]
pub struct RuleProfiler {
    stats: BTreeMap<&'static str, RuleStats>,
}

impl RuleProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one application of `rule` that produced `derived` candidate facts
    pub fn record(&mut self, rule: &'static str, derived: usize, elapsed: Duration) {
        let stats = self.stats.entry(rule).or_insert_with(|| RuleStats {
            name: rule.to_string(),
            ..RuleStats::default()
        });
        stats.calls += 1;
        stats.derived += derived as u64;
        stats.elapsed_nanos = stats
            .elapsed_nanos
            .saturating_add(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
    }

    pub fn get(&self, rule: &str) -> Option<&RuleStats> {
        self.stats.get(rule)
    }

    /// Report ordered by rule name
    pub fn report(&self) -> Vec<RuleStats> {
        self.stats.values().cloned().collect()
    }

    pub fn log_summary(&self) {
        for stats in self.stats.values() {
            debug!(
                "{}: {} calls, {} derived, {:?}",
                stats.name,
                stats.calls,
                stats.derived,
                stats.elapsed()
            );
        }
    }
}
