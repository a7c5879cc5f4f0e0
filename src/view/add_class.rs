use uuid::Uuid;

use super::ViewStatus;
use crate::client::ClassApi;
use crate::data::class::db::ClassCreateData;

/// New class form: name, description and an ordered list of parts.
#[derive(Debug, Default)]
pub struct AddClassView {
    pub name: String,
    pub description: String,
    parts: Vec<String>,
    pub status: ViewStatus,
}

impl AddClassView {
    pub fn new() -> AddClassView {
        AddClassView::default()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Appends a trimmed part name. Blank and repeated names are ignored.
    pub fn add_part(&mut self, part: &str) -> bool {
        let part = part.trim();
        if part.is_empty() || self.parts.iter().any(|it| it == part) {
            return false;
        }
        self.parts.push(part.to_string());
        true
    }

    pub fn remove_part(&mut self, part: &str) {
        self.parts.retain(|it| it != part);
    }

    pub async fn submit<A: ClassApi + ?Sized>(&mut self, api: &A) -> Option<Uuid> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            self.status.reject("Name and description are required.");
            return None;
        }

        self.status.start();
        let data = ClassCreateData {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            parts: self.parts.clone(),
            ..Default::default()
        };

        match api.create_class(&data).await {
            Ok(id) => {
                self.name.clear();
                self.description.clear();
                self.parts.clear();
                self.status.succeed("Class added successfully");
                Some(id)
            }
            Err(e) => {
                self.status.fail("Failed to add class", e);
                None
            }
        }
    }
}
