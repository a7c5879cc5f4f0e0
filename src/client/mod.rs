//! Client side of the `/api/classes` surface, used by the view-models.

use std::env;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::data::class::db::{ClassCreateData, ClassUpdateData, CreatedResponse};
use crate::data::class::{Class, Student};
use crate::resp::problem::ErrorResponse;

#[cfg(test)]
pub mod local;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{status}: {error}")]
    Status { status: u16, error: String },
    #[error("unable to decode response body")]
    Decode,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|it| it.as_u16()),
            ClientError::Decode => None,
        }
    }
}

/// Operations the views need from the backend. Every call is awaited to completion; nothing
/// is retried.
#[rocket::async_trait(?Send)]
pub trait ClassApi {
    async fn list_classes(&self) -> Result<Vec<Class>, ClientError>;
    async fn get_class(&self, id: Uuid) -> Result<Class, ClientError>;
    async fn create_class(&self, data: &ClassCreateData) -> Result<Uuid, ClientError>;
    async fn update_class(&self, id: Uuid, data: &ClassUpdateData) -> Result<(), ClientError>;
    async fn delete_class(&self, id: Uuid) -> Result<(), ClientError>;
    async fn list_students(&self, id: Uuid) -> Result<Vec<Student>, ClientError>;
    async fn add_student(&self, id: Uuid, student: &Student) -> Result<(), ClientError>;
}

/// [ClassApi] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClassApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClassApi {
    pub fn new(base_url: impl ToString) -> HttpClassApi {
        HttpClassApi {
            client: reqwest::Client::new(),
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_env() -> HttpClassApi {
        HttpClassApi::new(env::var("API_BASE_URL").unwrap_or("http://localhost:3000".to_string()))
    }

    /// Session token from the identity provider, sent as a bearer token.
    pub fn with_token(mut self, token: impl ToString) -> HttpClassApi {
        self.token = Some(token.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        tracing::debug!("request failed with {}: {}", status, error);
        Err(ClientError::Status {
            status: status.as_u16(),
            error,
        })
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        Ok(HttpClassApi::send(request).await?.json().await?)
    }

    async fn write<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<(), ClientError> {
        HttpClassApi::send(self.request(method, path).json(body)).await?;
        Ok(())
    }
}

#[rocket::async_trait(?Send)]
impl ClassApi for HttpClassApi {
    async fn list_classes(&self) -> Result<Vec<Class>, ClientError> {
        HttpClassApi::json(self.request(Method::GET, "/api/classes")).await
    }

    async fn get_class(&self, id: Uuid) -> Result<Class, ClientError> {
        HttpClassApi::json(self.request(Method::GET, &format!("/api/classes/{}", id))).await
    }

    async fn create_class(&self, data: &ClassCreateData) -> Result<Uuid, ClientError> {
        let created: CreatedResponse =
            HttpClassApi::json(self.request(Method::POST, "/api/classes").json(data)).await?;
        Ok(created.id)
    }

    async fn update_class(&self, id: Uuid, data: &ClassUpdateData) -> Result<(), ClientError> {
        self.write(Method::PUT, &format!("/api/classes/{}", id), data)
            .await
    }

    async fn delete_class(&self, id: Uuid) -> Result<(), ClientError> {
        HttpClassApi::send(self.request(Method::DELETE, &format!("/api/classes/{}", id))).await?;
        Ok(())
    }

    async fn list_students(&self, id: Uuid) -> Result<Vec<Student>, ClientError> {
        HttpClassApi::json(self.request(Method::GET, &format!("/api/classes/{}/students", id)))
            .await
    }

    async fn add_student(&self, id: Uuid, student: &Student) -> Result<(), ClientError> {
        self.write(Method::PUT, &format!("/api/classes/{}/students", id), student)
            .await
    }
}
