use uuid::Uuid;

use super::ViewStatus;
use crate::client::ClassApi;
use crate::data::class::Student;

/// Adds students to a picked class and shows its current roster.
#[derive(Debug, Default)]
pub struct AddStudentView {
    class: Option<Uuid>,
    students: Vec<Student>,
    pub name: String,
    pub status: ViewStatus,
}

impl AddStudentView {
    pub fn new() -> AddStudentView {
        AddStudentView::default()
    }

    pub fn class(&self) -> Option<Uuid> {
        self.class
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub async fn select<A: ClassApi + ?Sized>(&mut self, api: &A, class: Uuid) -> bool {
        self.class = Some(class);
        self.refresh(api).await
    }

    async fn refresh<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(class) = self.class else {
            return false;
        };

        match api.list_students(class).await {
            Ok(students) => {
                self.students = students;
                true
            }
            Err(e) => {
                self.students.clear();
                self.status.fail("Failed to fetch students.", e);
                false
            }
        }
    }

    pub async fn save<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(class) = self.class else {
            self.status.reject("Please select a class.");
            return false;
        };
        if self.name.trim().is_empty() {
            self.status.reject("Student name is required.");
            return false;
        }

        self.status.start();
        let student = Student::new(self.name.trim());
        if let Err(e) = api.add_student(class, &student).await {
            self.status.fail("Failed to add student.", e);
            return false;
        }

        self.name.clear();
        self.status.succeed("Student added successfully");
        self.refresh(api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::local::FailingApi;
    use crate::data::class::db::ClassCreateData;
    use crate::testing::local_api;
    use rocket::http::Status;

    #[rocket::async_test]
    async fn saved_students_show_up_in_the_roster() {
        let api = local_api().await;
        let class = api
            .create_class(&ClassCreateData {
                name: "Math101".to_string(),
                description: "desc".to_string(),
                ..Default::default()
            })
            .await
            .expect("class created");

        let mut view = AddStudentView::new();
        assert!(view.select(&api, class).await);
        assert!(view.students().is_empty());

        view.name = " Ana ".to_string();
        assert!(view.save(&api).await);
        view.name = "Ben".to_string();
        assert!(view.save(&api).await);

        let names: Vec<_> = view.students().iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
        assert!(view.name.is_empty());
        assert_eq!(view.status.message.as_deref(), Some("Student added successfully"));
    }

    #[rocket::async_test]
    async fn save_needs_a_class_and_a_name() {
        let api = FailingApi {
            status: Status::InternalServerError,
        };
        let mut view = AddStudentView::new();
        view.name = "Ana".to_string();

        assert!(!view.save(&api).await);
        assert_eq!(view.status.message.as_deref(), Some("Please select a class."));

        view.class = Some(Uuid::new_v4());
        view.name = "  ".to_string();
        assert!(!view.save(&api).await);
        assert_eq!(view.status.message.as_deref(), Some("Student name is required."));
        assert!(view.status.error.is_none());
    }

    #[rocket::async_test]
    async fn missing_class_clears_the_roster() {
        let api = local_api().await;
        let mut view = AddStudentView {
            students: vec![Student::new("Stale")],
            ..Default::default()
        };

        assert!(!view.select(&api, Uuid::new_v4()).await);
        assert!(view.students().is_empty());
        assert_eq!(view.status.error.as_deref(), Some("Failed to fetch students."));
    }
}
