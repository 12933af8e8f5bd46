//! Recording metrics port

use std::collections::HashMap;
use std::sync::Mutex;

use core_kernel::MetricsPort;

/// Metrics port that counts increments by name
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    counters: Mutex<HashMap<String, u64>>,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter; 0 if never incremented
    pub fn count(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .expect("metrics lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Names of every counter incremented so far, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .counters
            .lock()
            .expect("metrics lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl MetricsPort for RecordingMetrics {
    fn increment(&self, name: &str, _tags: &[(&str, &str)]) {
        *self
            .counters
            .lock()
            .expect("metrics lock poisoned")
            .entry(name.to_string())
            .or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_name() {
        let metrics = RecordingMetrics::new();
        metrics.increment("a", &[]);
        metrics.increment("a", &[("k", "v")]);
        metrics.increment("b", &[]);

        assert_eq!(metrics.count("a"), 2);
        assert_eq!(metrics.count("b"), 1);
        assert_eq!(metrics.count("c"), 0);
        assert_eq!(metrics.names(), vec!["a", "b"]);
    }
}
