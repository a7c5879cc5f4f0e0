use uuid::Uuid;

use super::{ClassAction, ViewStatus};
use crate::client::ClassApi;
use crate::data::class::db::ClassUpdateData;
use crate::data::class::{Activity, Class};

/// Where a new activity is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityScope {
    /// A class activity, tagged with one of the class parts.
    Class { part: Option<String> },
    /// A participated activity of one student. Not tagged with a part.
    Student(Uuid),
}

impl Default for ActivityScope {
    fn default() -> Self {
        ActivityScope::Class { part: None }
    }
}

#[derive(Debug, Default)]
pub struct AddActivityView {
    class: Option<Class>,
    pub scope: ActivityScope,
    pub name: String,
    pub date: String,
    pub status: ViewStatus,
}

impl AddActivityView {
    pub fn new() -> AddActivityView {
        AddActivityView::default()
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    fn default_scope(class: &Class) -> ActivityScope {
        ActivityScope::Class {
            part: class.parts.first().cloned(),
        }
    }

    /// Loads the full class; the part picker starts on its first part.
    pub async fn select<A: ClassApi + ?Sized>(&mut self, api: &A, id: Uuid) -> bool {
        self.status.start();
        match api.get_class(id).await {
            Ok(class) => {
                self.scope = AddActivityView::default_scope(&class);
                self.class = Some(class);
                self.status.done();
                true
            }
            Err(e) => {
                self.status.fail("Failed to fetch class.", e);
                false
            }
        }
    }

    pub async fn submit<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(class) = &self.class else {
            self.status
                .reject("Please select a class and ensure its data is loaded.");
            return false;
        };

        let action = match &self.scope {
            ActivityScope::Class { part } => ClassAction::SaveActivity(Activity::new(
                self.name.trim(),
                self.date.trim(),
                part.clone(),
            )),
            ActivityScope::Student(student) => ClassAction::AddStudentActivity {
                student: *student,
                activity: Activity::new(self.name.trim(), self.date.trim(), None),
            },
        };
        let next = match action.apply(class) {
            Ok(next) => next,
            Err(e) => {
                self.status.reject(e);
                return false;
            }
        };

        self.status.start();
        if let Err(e) = api.update_class(next.id, &ClassUpdateData::from(&next)).await {
            self.status.fail("Error adding activity", e);
            return false;
        }

        self.scope = AddActivityView::default_scope(&next);
        self.class = Some(next);
        self.name.clear();
        self.date.clear();
        self.status.succeed("Activity added successfully!");
        true
    }
}
