use std::time::Duration;

use http::header::ACCEPT;
use http::Method;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::config::AppConfig;
use crate::errors::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Bearer-authenticated JSON client for the ticketing backend.
///
/// No retries: every failure is returned to the caller as-is.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url().to_string(),
            token: cfg.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, AppError> {
        let body = self.send(Method::GET, path, query, None::<&()>).await?;
        decode(path, &body)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::POST, path, &[], Some(payload)).await?;
        decode(path, &body)
    }

    pub async fn put_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PUT, path, &[], Some(payload)).await?;
        decode(path, &body)
    }

    pub async fn patch_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PATCH, path, &[], Some(payload)).await?;
        decode(path, &body)
    }

    /// DELETE a resource; any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        payload: Option<&B>,
    ) -> Result<String, AppError>
    where
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4();
        let url = self.url(path);

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(payload) = payload {
            req = req.json(payload);
        }

        debug!(%request_id, %method, path, "Sending backend request");

        let resp = req.send().await.map_err(|e| {
            warn!(%request_id, %method, path, error = %e, "Backend request failed");
            AppError::Request(e)
        })?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            warn!(%request_id, %method, path, status = status.as_u16(), "Backend rejected request");
            return Err(AppError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(%request_id, status = status.as_u16(), bytes = text.len(), "Backend responded");
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|source| AppError::Decode {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&AppConfig::for_base_url(&format!("{}/", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn get_sends_bearer_token_and_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("page", "2"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", "application/json"))
            .and(header_exists(REQUEST_ID_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let rows: Vec<Value> = client
            .get_json("/events", &[("page".to_string(), "2".to_string())])
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({ "id": 1 })]);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/orders/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Order not found"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_json::<Value>("orders/99", &[]).await.unwrap_err();

        match err {
            AppError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Order not found");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_json::<Value>("/stats/orders", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Decode { ref path, .. } if path == "/stats/orders"));
    }

    #[tokio::test]
    async fn write_verbs_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/shows"))
            .and(body_json(json!({ "name": "Matinee" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "name": "Matinee" })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/shows/5"))
            .and(body_json(json!({ "name": "Late show", "capacity": 120 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "name": "Late show", "capacity": 120 })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/shows/5"))
            .and(body_json(json!({ "name": "Evening" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5, "name": "Evening" })))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/shows/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let created: Value = client.post_json("/shows", &json!({ "name": "Matinee" })).await.unwrap();
        assert_eq!(created["id"], 5);

        let replaced: Value = client
            .put_json("/shows/5", &json!({ "name": "Late show", "capacity": 120 }))
            .await
            .unwrap();
        assert_eq!(replaced["capacity"], 120);

        let updated: Value = client.patch_json("/shows/5", &json!({ "name": "Evening" })).await.unwrap();
        assert_eq!(updated["name"], "Evening");

        client.delete("/shows/5").await.unwrap();
    }
}
