//! [ClassApi] dispatching into an in-process Rocket instance.

use rocket::http::Status;
use rocket::local::asynchronous::{Client, LocalResponse};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{ClassApi, ClientError};
use crate::data::class::db::{ClassCreateData, ClassUpdateData, CreatedResponse};
use crate::data::class::{Class, Student};
use crate::resp::problem::ErrorResponse;

pub struct LocalApi {
    pub client: Client,
}

impl LocalApi {
    pub fn new(client: Client) -> LocalApi {
        LocalApi { client }
    }

    async fn check(response: LocalResponse<'_>) -> Result<LocalResponse<'_>, ClientError> {
        let status = response.status();
        if status.class().is_success() {
            return Ok(response);
        }

        let error = response
            .into_json::<ErrorResponse>()
            .await
            .map(|it| it.error)
            .unwrap_or_else(|| status.reason().unwrap_or("request failed").to_string());
        Err(ClientError::Status {
            status: status.code,
            error,
        })
    }

    async fn json<T: DeserializeOwned + Send + 'static>(
        response: LocalResponse<'_>,
    ) -> Result<T, ClientError> {
        LocalApi::check(response)
            .await?
            .into_json()
            .await
            .ok_or(ClientError::Decode)
    }
}

#[rocket::async_trait(?Send)]
impl ClassApi for LocalApi {
    async fn list_classes(&self) -> Result<Vec<Class>, ClientError> {
        LocalApi::json(self.client.get("/api/classes").dispatch().await).await
    }

    async fn get_class(&self, id: Uuid) -> Result<Class, ClientError> {
        LocalApi::json(self.client.get(format!("/api/classes/{}", id)).dispatch().await).await
    }

    async fn create_class(&self, data: &ClassCreateData) -> Result<Uuid, ClientError> {
        let response = self.client.post("/api/classes").json(data).dispatch().await;
        let created: CreatedResponse = LocalApi::json(response).await?;
        Ok(created.id)
    }

    async fn update_class(&self, id: Uuid, data: &ClassUpdateData) -> Result<(), ClientError> {
        let response = self
            .client
            .put(format!("/api/classes/{}", id))
            .json(data)
            .dispatch()
            .await;
        LocalApi::check(response).await.map(|_| ())
    }

    async fn delete_class(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self.client.delete(format!("/api/classes/{}", id)).dispatch().await;
        LocalApi::check(response).await.map(|_| ())
    }

    async fn list_students(&self, id: Uuid) -> Result<Vec<Student>, ClientError> {
        LocalApi::json(
            self.client
                .get(format!("/api/classes/{}/students", id))
                .dispatch()
                .await,
        )
        .await
    }

    async fn add_student(&self, id: Uuid, student: &Student) -> Result<(), ClientError> {
        let response = self
            .client
            .put(format!("/api/classes/{}/students", id))
            .json(student)
            .dispatch()
            .await;
        LocalApi::check(response).await.map(|_| ())
    }
}

/// Fails every call, for exercising the error paths of views.
pub struct FailingApi {
    pub status: Status,
}

#[rocket::async_trait(?Send)]
impl ClassApi for FailingApi {
    async fn list_classes(&self) -> Result<Vec<Class>, ClientError> {
        Err(self.error())
    }

    async fn get_class(&self, _: Uuid) -> Result<Class, ClientError> {
        Err(self.error())
    }

    async fn create_class(&self, _: &ClassCreateData) -> Result<Uuid, ClientError> {
        Err(self.error())
    }

    async fn update_class(&self, _: Uuid, _: &ClassUpdateData) -> Result<(), ClientError> {
        Err(self.error())
    }

    async fn delete_class(&self, _: Uuid) -> Result<(), ClientError> {
        Err(self.error())
    }

    async fn list_students(&self, _: Uuid) -> Result<Vec<Student>, ClientError> {
        Err(self.error())
    }

    async fn add_student(&self, _: Uuid, _: &Student) -> Result<(), ClientError> {
        Err(self.error())
    }
}

impl FailingApi {
    fn error(&self) -> ClientError {
        ClientError::Status {
            status: self.status.code,
            error: self.status.reason().unwrap_or("failure").to_string(),
        }
    }
}
