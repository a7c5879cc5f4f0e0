//! Accessor over the `classes` document collection.
//!
//! Every operation maps onto a single store call. Whole-document writes are last-writer-wins;
//! [ClassStore::push_student] is the one atomic array operation and must stay that way.

use uuid::Uuid;

use crate::data::class::db::{ClassCreateData, ClassUpdateData};
use crate::data::class::{Class, Student};
use crate::error::StoreError;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;

#[rocket::async_trait]
pub trait ClassStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Class>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Class>, StoreError>;

    /// Inserts a new document stamped with `createdAt`, returning its generated id.
    async fn insert(&self, data: ClassCreateData) -> Result<Uuid, StoreError>;

    /// Writes only the fields present in `data` and stamps `updatedAt`.
    ///
    /// Fails with [StoreError::NotFound] instead of creating a missing document.
    async fn update(&self, id: Uuid, data: ClassUpdateData) -> Result<(), StoreError>;

    /// Removing a missing document isn't an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Atomically adds `student` to the `students` array (set union, no read-modify-write).
    async fn push_student(&self, id: Uuid, student: Student) -> Result<(), StoreError>;

    async fn students(&self, id: Uuid) -> Result<Option<Vec<Student>>, StoreError>;
}

pub type DynStore = Box<dyn ClassStore>;
