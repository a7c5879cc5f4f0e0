//! Reducer over a class snapshot.
//!
//! Views never edit a [Class] in place: each user action is applied to the current snapshot,
//! producing the next one, which is then sent to the backend as a whole document. Embedded
//! records are addressed by their synthetic ids, never by position.

use thiserror::Error;
use uuid::Uuid;

use crate::data::class::{Activity, Class, Student};

#[derive(Debug, Clone, PartialEq)]
pub enum ClassAction {
    Rename(String),
    Describe(String),
    AddPart(String),
    /// Removes the part and every class activity tagged with it.
    DeletePart(String),
    /// Replaces the activity with the same id, or appends it.
    SaveActivity(Activity),
    DeleteActivity(Uuid),
    AddStudentActivity { student: Uuid, activity: Activity },
    /// Replaces the student with the same id.
    SaveStudent(Student),
    DeleteStudent(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Part '{0}' already exists.")]
    DuplicatePart(String),
    #[error("Part '{0}' doesn't exist.")]
    UnknownPart(String),
    #[error("Activity doesn't exist.")]
    UnknownActivity(Uuid),
    #[error("Student doesn't exist.")]
    UnknownStudent(Uuid),
}

fn required(value: &str, field: &'static str) -> Result<(), ActionError> {
    if value.trim().is_empty() {
        return Err(ActionError::Required(field));
    }
    Ok(())
}

fn check_activity(activity: &Activity) -> Result<(), ActionError> {
    required(&activity.name, "Activity name")?;
    required(&activity.date, "Activity date")
}

impl ClassAction {
    pub fn apply(&self, class: &Class) -> Result<Class, ActionError> {
        let mut next = class.clone();

        match self {
            ClassAction::Rename(name) => {
                required(name, "Name")?;
                next.name = name.clone();
            }
            ClassAction::Describe(description) => {
                next.description = description.clone();
            }
            ClassAction::AddPart(part) => {
                let part = part.trim();
                required(part, "Part name")?;
                if next.parts.iter().any(|it| it == part) {
                    return Err(ActionError::DuplicatePart(part.to_string()));
                }
                next.parts.push(part.to_string());
            }
            ClassAction::DeletePart(part) => {
                if !next.parts.contains(part) {
                    return Err(ActionError::UnknownPart(part.clone()));
                }
                next.parts.retain(|it| it != part);
                next.activities
                    .retain(|it| it.part.as_deref() != Some(part.as_str()));
            }
            ClassAction::SaveActivity(activity) => {
                check_activity(activity)?;
                match next.activities.iter_mut().find(|it| it.id == activity.id) {
                    Some(existing) => *existing = activity.clone(),
                    None => next.activities.push(activity.clone()),
                }
            }
            ClassAction::DeleteActivity(id) => {
                let before = next.activities.len();
                next.activities.retain(|it| it.id != *id);
                if next.activities.len() == before {
                    return Err(ActionError::UnknownActivity(*id));
                }
            }
            ClassAction::AddStudentActivity { student, activity } => {
                check_activity(activity)?;
                let target = next
                    .students
                    .iter_mut()
                    .find(|it| it.id == *student)
                    .ok_or(ActionError::UnknownStudent(*student))?;
                target.participated_activities.push(Activity {
                    part: None,
                    ..activity.clone()
                });
            }
            ClassAction::SaveStudent(student) => {
                required(&student.name, "Student name")?;
                let target = next
                    .students
                    .iter_mut()
                    .find(|it| it.id == student.id)
                    .ok_or(ActionError::UnknownStudent(student.id))?;
                *target = student.clone();
            }
            ClassAction::DeleteStudent(id) => {
                let before = next.students.len();
                next.students.retain(|it| it.id != *id);
                if next.students.len() == before {
                    return Err(ActionError::UnknownStudent(*id));
                }
            }
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::class::db::ClassCreateData;
    use chrono::Utc;

    fn class_with_parts(parts: &[&str]) -> Class {
        ClassCreateData {
            name: "Math101".to_string(),
            description: "Room 4".to_string(),
            parts: parts.iter().map(|it| it.to_string()).collect(),
            ..Default::default()
        }
        .into_class(Uuid::new_v4(), Utc::now())
    }

    fn activity(name: &str, part: Option<&str>) -> Activity {
        Activity::new(name, "2024-01-10", part.map(String::from))
    }

    #[test]
    fn deleting_a_part_cascades_to_its_activities() {
        let mut class = class_with_parts(&["Week1", "Week2"]);
        class.activities = vec![
            activity("Quiz", Some("Week1")),
            activity("Lab", Some("Week2")),
            activity("Essay", Some("Week1")),
            activity("Trip", None),
        ];

        let next = ClassAction::DeletePart("Week1".to_string())
            .apply(&class)
            .expect("part exists");

        assert_eq!(next.parts, vec!["Week2".to_string()]);
        let names: Vec<_> = next.activities.iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["Lab", "Trip"]);
        // the original snapshot is untouched
        assert_eq!(class.activities.len(), 4);
    }

    #[test]
    fn parts_are_trimmed_and_deduplicated() {
        let class = class_with_parts(&["Week1"]);

        let next = ClassAction::AddPart("  Week2 ".to_string())
            .apply(&class)
            .expect("new part");
        assert_eq!(next.parts, vec!["Week1".to_string(), "Week2".to_string()]);

        assert_eq!(
            ClassAction::AddPart("Week1".to_string()).apply(&next),
            Err(ActionError::DuplicatePart("Week1".to_string()))
        );
        assert_eq!(
            ClassAction::AddPart("   ".to_string()).apply(&next),
            Err(ActionError::Required("Part name"))
        );
    }

    #[test]
    fn activities_are_saved_by_id() {
        let class = class_with_parts(&["Week1"]);
        let quiz = activity("Quiz", Some("Week1"));

        let added = ClassAction::SaveActivity(quiz.clone())
            .apply(&class)
            .expect("valid activity");
        let renamed = ClassAction::SaveActivity(Activity {
            name: "Final quiz".to_string(),
            ..quiz.clone()
        })
        .apply(&added)
        .expect("valid activity");

        assert_eq!(renamed.activities.len(), 1);
        assert_eq!(renamed.activities[0].name, "Final quiz");

        let removed = ClassAction::DeleteActivity(quiz.id)
            .apply(&renamed)
            .expect("activity exists");
        assert!(removed.activities.is_empty());
        assert_eq!(
            ClassAction::DeleteActivity(quiz.id).apply(&removed),
            Err(ActionError::UnknownActivity(quiz.id))
        );
    }

    #[test]
    fn student_edits_address_students_by_id() {
        let mut class = class_with_parts(&[]);
        let ana = Student::new("Ana");
        let ben = Student::new("Ben");
        class.students = vec![ana.clone(), ben.clone()];

        let next = ClassAction::AddStudentActivity {
            student: ben.id,
            activity: activity("Presentation", Some("Week1")),
        }
        .apply(&class)
        .expect("student exists");
        let ben_after = next.student(ben.id).expect("ben is kept");
        assert_eq!(ben_after.participated_activities.len(), 1);
        assert!(ben_after.participated_activities[0].part.is_none());
        assert!(next.student(ana.id).expect("ana").participated_activities.is_empty());

        let next = ClassAction::DeleteStudent(ana.id).apply(&next).expect("ana exists");
        assert_eq!(next.students.len(), 1);
        assert_eq!(next.students[0].id, ben.id);

        let ghost = Student::new("Ghost");
        assert_eq!(
            ClassAction::SaveStudent(ghost.clone()).apply(&next),
            Err(ActionError::UnknownStudent(ghost.id))
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        let class = class_with_parts(&[]);

        assert_eq!(
            ClassAction::Rename(" ".to_string()).apply(&class),
            Err(ActionError::Required("Name"))
        );
        assert_eq!(
            ClassAction::SaveActivity(Activity::new("Quiz", "", None)).apply(&class),
            Err(ActionError::Required("Activity date"))
        );
    }
}
