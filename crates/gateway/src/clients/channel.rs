//! JSON-over-HTTP RPC channel to one backend service.

use std::time::Instant;

use common::rpc::method_path;
use common::{RpcCode, RpcStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BackendError;

/// Long-lived handle to one backend, shared by every request.
#[derive(Debug, Clone)]
pub struct RpcChannel {
    client: reqwest::Client,
    base_url: String,
    service: &'static str,
    backend: &'static str,
}

impl RpcChannel {
    /// `base_url` is the backend origin, e.g. `http://localhost:50051`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        service: &'static str,
        backend: &'static str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            service,
            backend,
        }
    }

    /// Invokes `method` with `req` and decodes the response message.
    pub async fn call<Req, Resp>(&self, method: &'static str, req: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let started = Instant::now();
        metrics::counter!("gateway_backend_calls_total", "backend" => self.backend, "method" => method)
            .increment(1);

        let result = self.send(method, req).await;

        metrics::histogram!("gateway_backend_call_duration_seconds", "backend" => self.backend, "method" => method)
            .record(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            metrics::counter!(
                "gateway_backend_failures_total",
                "backend" => self.backend,
                "method" => method,
                "code" => e.code().as_str()
            )
            .increment(1);
            tracing::warn!(backend = self.backend, method, error = %e, "backend call failed");
        }
        result
    }

    async fn send<Req, Resp>(&self, method: &'static str, req: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, method_path(self.service, method));
        let transport = |source: reqwest::Error| BackendError::Transport {
            backend: self.backend,
            source,
        };

        let response = self
            .client
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|source| BackendError::Decode {
                backend: self.backend,
                source,
            });
        }

        let RpcStatus { code, message } = serde_json::from_slice(&body).unwrap_or_else(|_| {
            RpcStatus::new(
                RpcCode::from_http_status(status.as_u16()),
                String::from_utf8_lossy(&body).into_owned(),
            )
        });
        Err(BackendError::Remote {
            backend: self.backend,
            code,
            message,
        })
    }
}
