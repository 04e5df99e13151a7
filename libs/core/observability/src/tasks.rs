//! Task service metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Task service operation, used as the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    Create,
    Get,
    List,
    Update,
    Delete,
}

impl TaskOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::List => "list",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Result class of an operation, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
    Invalid,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Invalid => "invalid",
            Self::Error => "error",
        }
    }
}

/// Task metrics recorder
pub struct TaskMetrics;

impl TaskMetrics {
    /// Record one task service operation.
    pub fn record(operation: TaskOperation, outcome: Outcome, elapsed: Duration) {
        counter!(
            "task_operations_total",
            "operation" => operation.as_str(),
            "outcome" => outcome.as_str()
        )
        .increment(1);

        histogram!(
            "task_operation_duration_seconds",
            "operation" => operation.as_str()
        )
        .record(elapsed.as_secs_f64());

        tracing::trace!(
            operation = operation.as_str(),
            outcome = outcome.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Recorded task operation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_record_emits_labelled_counter() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            TaskMetrics::record(
                TaskOperation::Delete,
                Outcome::NotFound,
                Duration::from_millis(3),
            );
            TaskMetrics::record(
                TaskOperation::Create,
                Outcome::Success,
                Duration::from_millis(5),
            );
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"task_operations_total{operation="delete",outcome="not_found"} 1"#));
        assert!(rendered.contains(r#"task_operations_total{operation="create",outcome="success"} 1"#));
        assert!(rendered.contains("task_operation_duration_seconds"));
    }

    #[test]
    fn test_label_values() {
        assert_eq!(TaskOperation::Update.as_str(), "update");
        assert_eq!(Outcome::Invalid.as_str(), "invalid");
    }
}
