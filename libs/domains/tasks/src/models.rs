use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier
    #[schema(example = 42)]
    pub id: i64,
    /// Task title
    #[schema(example = "Write quarterly report")]
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Whether the task is completed
    pub completed: bool,
    /// Creation timestamp, never changes after insert
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a task
///
/// `title` is optional at the type level so that a missing or `null` title
/// surfaces as a validation error rather than a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[validate(required, length(min = 1, max = 255))]
    #[schema(required = true, min_length = 1, max_length = 255, example = "Write quarterly report")]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    #[schema(max_length = 1000)]
    pub description: Option<String>,
    /// Defaults to `false` when absent or `null`
    pub completed: Option<bool>,
}

impl TaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_serializes_camel_case() {
        let now = Utc::now();
        let task = Task {
            id: 1,
            title: "A".to_string(),
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["description"], serde_json::Value::Null);
    }

    #[test]
    fn test_request_title_required() {
        let missing: TaskRequest = serde_json::from_value(json!({ "completed": true })).unwrap();
        assert!(missing.validate().is_err());

        let null: TaskRequest = serde_json::from_value(json!({ "title": null })).unwrap();
        let errors = null.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_request_length_boundaries() {
        assert!(TaskRequest::new("t".repeat(255)).validate().is_ok());
        assert!(TaskRequest::new("t".repeat(256)).validate().is_err());
        assert!(TaskRequest::new("").validate().is_err());

        let at_limit = TaskRequest::new("t").with_description("d".repeat(1000));
        assert!(at_limit.validate().is_ok());

        let over_limit = TaskRequest::new("t").with_description("d".repeat(1001));
        let errors = over_limit.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_request_completed_optional() {
        let request: TaskRequest = serde_json::from_value(json!({ "title": "A" })).unwrap();
        assert_eq!(request.completed, None);
        assert!(request.validate().is_ok());
    }
}
