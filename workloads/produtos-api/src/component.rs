//! Spin HTTP entry point.

use anyhow::Context as _;
use produtos_core::{ApiError, ApiRequest, SystemClock};
use produtos_observability::StructuredLogger;
use produtos_store::{KvRecordStore, SpinBackend};
use spin_sdk::http::{IntoResponse, Method as SpinMethod, Request, Response};
use spin_sdk::http_component;

use crate::{ApiResponse, HandlerConfig, RequestHandler, WORKLOAD};

#[http_component]
fn handle_produtos(req: Request) -> anyhow::Result<impl IntoResponse> {
    let request = ApiRequest::new(method_name(req.method()), req.path())
        .with_body(req.body().to_vec());

    let response = match serve(&request) {
        Ok(response) => response,
        Err(e) => {
            StructuredLogger::new(request.request_id.clone())
                .with_workload(WORKLOAD)
                .with_route(&request.path)
                .error_builder("Handler setup failed")
                .field("error", format!("{:#}", e))
                .emit();
            ApiResponse::error(&ApiError::internal(format!("{:#}", e)))
                .with_header("x-request-id", request.request_id.to_string())
        }
    };

    Ok(into_spin(response))
}

fn serve(request: &ApiRequest) -> anyhow::Result<ApiResponse> {
    let config = HandlerConfig::from_lookup(|key| spin_sdk::variables::get(key).ok())
        .context("loading handler configuration")?;

    let backend = SpinBackend::open(&config.store_name)
        .with_context(|| format!("opening key-value store '{}'", config.store_name))?;
    let store = KvRecordStore::new(backend, config.key_prefix.clone());

    let handler = RequestHandler::new(store, SystemClock, config);
    Ok(handler.handle(request))
}

fn method_name(method: &SpinMethod) -> &str {
    match method {
        SpinMethod::Get => "GET",
        SpinMethod::Post => "POST",
        SpinMethod::Put => "PUT",
        SpinMethod::Delete => "DELETE",
        SpinMethod::Patch => "PATCH",
        SpinMethod::Head => "HEAD",
        SpinMethod::Options => "OPTIONS",
        SpinMethod::Connect => "CONNECT",
        SpinMethod::Trace => "TRACE",
        SpinMethod::Other(other) => other.as_str(),
    }
}

fn into_spin(response: ApiResponse) -> Response {
    let mut builder = Response::builder();
    builder.status(response.status);
    for (name, value) in &response.headers {
        builder.header(name.as_str(), value.as_str());
    }
    builder.body(response.body).build()
}
