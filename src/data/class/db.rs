use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Activity, Class, Student};

/// Body of `POST /api/classes`. Ids and timestamps are assigned by the accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassCreateData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parts: Vec<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl ClassCreateData {
    pub fn into_class(self, id: Uuid, created_at: DateTime<Utc>) -> Class {
        Class {
            id,
            name: self.name,
            description: self.description,
            parts: self.parts,
            activities: self.activities,
            students: self.students,
            created_at: Some(created_at),
            updated_at: None,
        }
    }
}

/// Body of `PUT /api/classes/{id}`. Only fields present in the body are written.
///
/// Unknown keys (`id`, `createdAt`, `updatedAt` echoed back by clients) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassUpdateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Student>>,
}

impl ClassUpdateData {
    pub fn is_empty(&self) -> bool {
        self == &ClassUpdateData::default()
    }

    pub fn apply_to(self, class: &mut Class, updated_at: DateTime<Utc>) {
        if let Some(name) = self.name {
            class.name = name;
        }
        if let Some(description) = self.description {
            class.description = description;
        }
        if let Some(parts) = self.parts {
            class.parts = parts;
        }
        if let Some(activities) = self.activities {
            class.activities = activities;
        }
        if let Some(students) = self.students {
            class.students = students;
        }
        class.updated_at = Some(updated_at);
    }
}

/// Whole-document replacement of every mutable field.
impl From<&Class> for ClassUpdateData {
    fn from(class: &Class) -> Self {
        ClassUpdateData {
            name: Some(class.name.clone()),
            description: Some(class.description.clone()),
            parts: Some(class.parts.clone()),
            activities: Some(class.activities.clone()),
            students: Some(class.students.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl ToString) -> MessageResponse {
        MessageResponse {
            message: message.to_string(),
        }
    }
}
