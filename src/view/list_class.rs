use uuid::Uuid;

use super::ViewStatus;
use crate::client::ClassApi;
use crate::data::class::Class;

#[derive(Debug, Default)]
pub struct ListClassView {
    classes: Vec<Class>,
    pub status: ViewStatus,
}

impl ListClassView {
    pub fn new() -> ListClassView {
        ListClassView::default()
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub async fn load<A: ClassApi + ?Sized>(&mut self, api: &A) -> bool {
        self.status.start();
        match api.list_classes().await {
            Ok(classes) => {
                self.classes = classes;
                self.status.done();
                true
            }
            Err(e) => {
                self.status.fail("Failed to fetch classes.", e);
                false
            }
        }
    }

    /// Removes the class remotely, then from the local list.
    pub async fn delete<A: ClassApi + ?Sized>(&mut self, api: &A, id: Uuid) -> bool {
        match api.delete_class(id).await {
            Ok(()) => {
                self.classes.retain(|it| it.id != id);
                self.status.succeed("Class deleted successfully");
                true
            }
            Err(e) => {
                self.status.fail("Failed to delete class.", e);
                false
            }
        }
    }
}
