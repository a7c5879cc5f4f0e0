use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub const CLASS_COLLECTION_NAME: &str = "classes";

/// Label used when an activity isn't tagged with a part.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A named, dated event. Class-scoped activities carry a `part`, student-scoped ones don't.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// ISO date, e.g. `2024-01-10`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
}

impl Activity {
    pub fn new(name: impl ToString, date: impl ToString, part: Option<String>) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            date: date.to_string(),
            part,
        }
    }

    /// Part name this activity is grouped under.
    pub fn part_label(&self) -> &str {
        match self.part.as_deref() {
            Some(part) if !part.is_empty() => part,
            _ => UNCATEGORIZED,
        }
    }

    /// Long form date (`10 January 2024`), or the raw value if it isn't an ISO date.
    pub fn display_date(&self) -> String {
        format_date(&self.date)
    }
}

pub fn format_date(date: &str) -> String {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").or_else(|_| {
        DateTime::parse_from_rfc3339(date).map(|it| it.date_naive())
    });

    match parsed {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub participated_activities: Vec<Activity>,
}

impl Student {
    pub fn new(name: impl ToString) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: name.to_string(),
            participated_activities: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub parts: Vec<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub students: Vec<Student>,

    /// Stamped on insert. Older documents may not carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Class {
    pub fn activities_in<'a>(&'a self, part: &'a str) -> impl Iterator<Item = &'a Activity> {
        self.activities
            .iter()
            .filter(move |it| it.part.as_deref() == Some(part))
    }

    pub fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|it| it.id == id)
    }
}
