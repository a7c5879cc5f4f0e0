use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ClassStore;
use crate::data::class::db::{ClassCreateData, ClassUpdateData};
use crate::data::class::{Class, Student};
use crate::error::StoreError;

/// Process-local store for development runs and tests. Keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    classes: RwLock<Vec<Class>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[rocket::async_trait]
impl ClassStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Class>, StoreError> {
        Ok(self.classes.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Class>, StoreError> {
        Ok(self.classes.read().await.iter().find(|it| it.id == id).cloned())
    }

    async fn insert(&self, data: ClassCreateData) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.classes
            .write()
            .await
            .push(data.into_class(id, Utc::now()));
        Ok(id)
    }

    async fn update(&self, id: Uuid, data: ClassUpdateData) -> Result<(), StoreError> {
        let mut classes = self.classes.write().await;
        let class = classes
            .iter_mut()
            .find(|it| it.id == id)
            .ok_or(StoreError::NotFound(id))?;
        data.apply_to(class, Utc::now());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.classes.write().await.retain(|it| it.id != id);
        Ok(())
    }

    async fn push_student(&self, id: Uuid, student: Student) -> Result<(), StoreError> {
        let mut classes = self.classes.write().await;
        let class = classes
            .iter_mut()
            .find(|it| it.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if !class.students.contains(&student) {
            class.students.push(student);
        }
        Ok(())
    }

    async fn students(&self, id: Uuid) -> Result<Option<Vec<Student>>, StoreError> {
        Ok(self
            .classes
            .read()
            .await
            .iter()
            .find(|it| it.id == id)
            .map(|it| it.students.clone()))
    }
}
