//! Metrics port
//!
//! Counters are reported through an injected `MetricsPort` so components
//! carry no global hooks. Production wiring uses `TracingMetrics`; tests
//! swap in a recording implementation.

/// Receives counter increments from the core components
pub trait MetricsPort: Send + Sync {
    /// Increments a named counter, tagged with key/value pairs
    fn increment(&self, name: &str, tags: &[(&str, &str)]);
}

/// Emits each increment as a structured debug event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetrics;

impl MetricsPort for TracingMetrics {
    fn increment(&self, name: &str, tags: &[(&str, &str)]) {
        tracing::debug!(metric = name, tags = ?tags, "counter incremented");
    }
}

/// Discards all increments
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsPort for NoopMetrics {
    fn increment(&self, _name: &str, _tags: &[(&str, &str)]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_metrics_emits_debug_event() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let metrics: Arc<dyn MetricsPort> = Arc::new(TracingMetrics);

        tracing::subscriber::with_default(subscriber, || {
            metrics.increment("routing.decision", &[("unit", "9999")]);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("counter incremented"));
        assert!(output.contains("routing.decision"));
        assert!(output.contains("9999"));
    }
}
