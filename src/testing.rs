//! Shared fixtures for endpoint and view tests.

use rocket::local::asynchronous::Client;

use crate::client::local::LocalApi;
use crate::config::Config;
use crate::store::MemoryStore;

pub async fn local_client_with(config: Config) -> Client {
    let rocket = crate::build(config, Box::new(MemoryStore::new())).expect("valid backend");
    Client::tracked(rocket).await.expect("valid rocket instance")
}

pub async fn local_client() -> Client {
    local_client_with(Config::local()).await
}

pub async fn local_api() -> LocalApi {
    LocalApi::new(local_client().await)
}
