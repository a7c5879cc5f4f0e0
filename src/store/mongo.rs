use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use mongodb::options::FindOneOptions;
use mongodb::{Collection, Database};
use rocket::futures::StreamExt;
use uuid::Uuid;

use super::ClassStore;
use crate::data::class::db::{ClassCreateData, ClassUpdateData};
use crate::data::class::{Class, Student, CLASS_COLLECTION_NAME};
use crate::error::StoreError;

#[inline]
fn classes(db: &Database) -> Collection<Document> {
    db.collection(CLASS_COLLECTION_NAME)
}

#[inline]
pub fn class_id_filter(id: Uuid) -> Result<Document, StoreError> {
    Ok(doc! { "_id": bson::to_bson(&id)? })
}

/// Stored documents keep the class id in `_id`.
pub fn to_class_document(class: &Class) -> Result<Document, StoreError> {
    let mut document = bson::to_document(class)?;
    if let Some(id) = document.remove("id") {
        document.insert("_id", id);
    }
    Ok(document)
}

pub fn from_class_document(mut document: Document) -> Result<Class, StoreError> {
    if let Some(id) = document.remove("_id") {
        document.insert("id", id);
    }
    Ok(bson::from_document(document)?)
}

/// Fails on the first unreadable document, the same way a single read of it would.
pub fn classes_from_documents(documents: Vec<Document>) -> Result<Vec<Class>, StoreError> {
    documents
        .into_iter()
        .map(|document| {
            let id = document.get("_id").cloned();
            from_class_document(document).map_err(|e| {
                tracing::error!("Unable to deserialize Class document {:?}: {}", id, e);
                e
            })
        })
        .collect()
}

/// `$set` of the fields present in `data`, plus `updatedAt`.
pub fn update_document(data: &ClassUpdateData, now: DateTime<Utc>) -> Result<Document, StoreError> {
    let mut fields = bson::to_document(data)?;
    fields.insert("updatedAt", bson::to_bson(&now)?);
    Ok(doc! { "$set": fields })
}

#[rocket::async_trait]
impl ClassStore for Database {
    async fn list(&self) -> Result<Vec<Class>, StoreError> {
        let mut documents = classes(self).find(None, None).await?;

        let mut result = vec![];
        while let Some(document) = documents.next().await {
            result.push(document?);
        }

        classes_from_documents(result)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Class>, StoreError> {
        match classes(self).find_one(class_id_filter(id)?, None).await? {
            Some(document) => Ok(Some(from_class_document(document)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, data: ClassCreateData) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let class = data.into_class(id, Utc::now());

        classes(self)
            .insert_one(to_class_document(&class)?, None)
            .await?;

        tracing::debug!("inserted class {}", id);
        Ok(id)
    }

    async fn update(&self, id: Uuid, data: ClassUpdateData) -> Result<(), StoreError> {
        let result = classes(self)
            .update_one(class_id_filter(id)?, update_document(&data, Utc::now())?, None)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        classes(self).delete_one(class_id_filter(id)?, None).await?;
        Ok(())
    }

    async fn push_student(&self, id: Uuid, student: Student) -> Result<(), StoreError> {
        let update = doc! { "$addToSet": { "students": bson::to_bson(&student)? } };
        let result = classes(self)
            .update_one(class_id_filter(id)?, update, None)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn students(&self, id: Uuid) -> Result<Option<Vec<Student>>, StoreError> {
        let options = FindOneOptions::builder()
            .projection(doc! { "students": 1 })
            .build();

        let document = match classes(self).find_one(class_id_filter(id)?, options).await? {
            Some(document) => document,
            None => return Ok(None),
        };

        match document.get("students") {
            Some(students @ Bson::Array(_)) => Ok(Some(bson::from_bson(students.clone())?)),
            _ => Ok(Some(vec![])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_is_stored_as_object_key() {
        let class = ClassCreateData {
            name: "Math101".to_string(),
            description: "Room 4".to_string(),
            parts: vec!["Week1".to_string()],
            ..Default::default()
        }
        .into_class(Uuid::new_v4(), Utc::now());

        let document = to_class_document(&class).expect("class serializes");
        assert!(document.get("id").is_none());
        assert_eq!(
            document.get("_id"),
            class_id_filter(class.id).expect("id serializes").get("_id")
        );

        let restored = from_class_document(document).expect("class deserializes");
        assert_eq!(restored, class);
    }

    #[test]
    fn unreadable_document_fails_the_whole_list() {
        let class = ClassCreateData {
            name: "Math101".to_string(),
            ..Default::default()
        }
        .into_class(Uuid::new_v4(), Utc::now());
        let good = to_class_document(&class).expect("class serializes");
        let broken = doc! { "_id": bson::to_bson(&Uuid::new_v4()).expect("id serializes") };

        let listed = classes_from_documents(vec![good.clone()]).expect("readable documents");
        assert_eq!(listed, vec![class]);

        let result = classes_from_documents(vec![good, broken]);
        assert!(matches!(result, Err(StoreError::BsonDeserialization(_))));
    }

    #[test]
    fn update_sets_only_named_fields() {
        let data = ClassUpdateData {
            name: Some("Physics".to_string()),
            ..Default::default()
        };

        let update = update_document(&data, Utc::now()).expect("update serializes");
        let fields = update.get_document("$set").expect("$set document");

        assert_eq!(fields.get_str("name").ok(), Some("Physics"));
        assert!(fields.contains_key("updatedAt"));
        assert!(!fields.contains_key("description"));
        assert!(!fields.contains_key("students"));
        assert_eq!(fields.len(), 2);
    }
}
