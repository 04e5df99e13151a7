//! Conversions between the API shapes and the persisted entity.
//!
//! All functions are pure: ids and timestamps are left for the caller.

use sea_orm::ActiveValue::{NotSet, Set};

use crate::entity;
use crate::models::{Task, TaskRequest};

pub fn entity_to_wire(model: entity::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        description: model.description,
        completed: model.completed,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

/// Builds a new, unsaved entity from a request. `completed` defaults to
/// `false`; `id` and timestamps stay `NotSet`.
pub fn request_to_entity(request: TaskRequest) -> entity::ActiveModel {
    entity::ActiveModel {
        id: NotSet,
        title: Set(request.title.unwrap_or_default()),
        description: Set(request.description),
        completed: Set(request.completed.unwrap_or(false)),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

impl From<entity::Model> for Task {
    fn from(model: entity::Model) -> Self {
        entity_to_wire(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn model() -> entity::Model {
        let created = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        entity::Model {
            id: 9,
            title: "Write report".to_string(),
            description: Some("Q3".to_string()),
            completed: true,
            created_at: created.into(),
            updated_at: (created + chrono::Duration::minutes(5)).into(),
        }
    }

    #[test]
    fn test_entity_to_wire_copies_every_field() {
        let source = model();
        let task = entity_to_wire(source.clone());

        assert_eq!(task.id, 9);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description.as_deref(), Some("Q3"));
        assert!(task.completed);
        assert_eq!(task.created_at, source.created_at);
        assert_eq!(task.updated_at, source.updated_at);
        assert_eq!(Task::from(source), task);
    }

    #[test]
    fn test_request_to_entity_defaults_completed() {
        let active = request_to_entity(TaskRequest::new("A"));

        assert_eq!(active.id, NotSet);
        assert_eq!(active.title, Set("A".to_string()));
        assert_eq!(active.description, Set(None));
        assert_eq!(active.completed, Set(false));
        assert_eq!(active.created_at, NotSet);
        assert_eq!(active.updated_at, NotSet);
    }

    #[test]
    fn test_request_to_entity_keeps_values() {
        let request = TaskRequest::new("B").with_description("desc").with_completed(true);
        let active = request_to_entity(request);

        assert_eq!(active.description, Set(Some("desc".to_string())));
        assert_eq!(active.completed, Set(true));
    }
}
