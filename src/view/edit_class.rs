use uuid::Uuid;

use super::{ClassAction, ViewStatus};
use crate::client::ClassApi;
use crate::data::class::db::ClassUpdateData;
use crate::data::class::Class;

/// Class editor. Every action writes the whole resulting document back.
#[derive(Debug, Default)]
pub struct EditClassView {
    class: Option<Class>,
    pub status: ViewStatus,
}

impl EditClassView {
    pub fn new() -> EditClassView {
        EditClassView::default()
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    pub async fn load<A: ClassApi + ?Sized>(&mut self, api: &A, id: Uuid) -> bool {
        self.status.start();
        match api.get_class(id).await {
            Ok(class) => {
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

    /// Applies `action` to the loaded class and saves the result. The local copy only moves
    /// forward once the backend accepted it.
    pub async fn dispatch<A: ClassApi + ?Sized>(&mut self, api: &A, action: ClassAction) -> bool {
        let Some(class) = &self.class else {
            self.status.reject("No class loaded.");
            return false;
        };
        let next = match action.apply(class) {
            Ok(next) => next,
            Err(e) => {
                self.status.reject(e);
                return false;
            }
        };

        self.status.start();
        match api.update_class(next.id, &ClassUpdateData::from(&next)).await {
            Ok(()) => {
                self.class = Some(next);
                self.status.succeed("Class updated successfully");
                true
            }
            Err(e) => {
                self.status.fail("Failed to update class.", e);
                false
            }
        }
    }
}
