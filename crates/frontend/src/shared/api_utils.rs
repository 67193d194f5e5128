//! HTTP-обвязка фронтенда: базовый URL и запросы с токеном
//!
//! Все функции возвращают `Result<T, String>`; строка ошибки берётся из тела
//! `{ "error": "..." }`, иначе `HTTP <status>`.

use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::storage;

/// Базовый URL API: текущий хост, порт 3000
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::message_from_body(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

async fn send_body<B: Serialize, T: DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
) -> Result<T, String> {
    let response = with_auth(builder)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    send_body(Request::post(&api_url(path)), body).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    send_body(Request::patch(&api_url(path)), body).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    send_body(Request::put(&api_url(path)), body).await
}

/// Строка запроса из структуры (`serde_qs`), с ведущим `?` или пустая
pub fn query_string<Q: Serialize>(query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(s) if !s.is_empty() => format!("?{}", s),
        _ => String::new(),
    }
}
