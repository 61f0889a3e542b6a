//! Request dispatch and the five record operations.

use produtos_core::{
    decode_body, ApiError, ApiRequest, Clock, CreateProductBody, Product, ProductId,
    UpdateProductBody,
};
use produtos_observability::StructuredLogger;
use produtos_store::{RecordStore, StoreError};
use serde::Serialize;

use crate::config::HandlerConfig;
use crate::response::ApiResponse;
use crate::routes::Route;

/// Workload name attached to every log line.
pub const WORKLOAD: &str = "produtos-api";

/// Body of a successful create.
#[derive(Serialize)]
struct Created<'a> {
    mensagem: &'static str,
    produto: &'a Product,
}

/// Routes requests to operations against a record store.
///
/// The store and clock are injected once and shared by every request the
/// handler serves.
pub struct RequestHandler<S, C> {
    store: S,
    clock: C,
    config: HandlerConfig,
}

impl<S: RecordStore, C: Clock> RequestHandler<S, C> {
    pub fn new(store: S, clock: C, config: HandlerConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Logger for `request` built from the configured level and format.
    pub fn logger_for(&self, request: &ApiRequest) -> StructuredLogger {
        StructuredLogger::new(request.request_id.clone())
            .with_workload(WORKLOAD)
            .with_route(&request.path)
            .with_min_level(self.config.log_level)
            .with_format(self.config.log_format)
    }

    /// Handle one request. Never fails: errors become error responses.
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let logger = self.logger_for(request);
        self.handle_with_logger(request, &logger)
    }

    /// Handle one request, logging through `logger`.
    pub fn handle_with_logger(
        &self,
        request: &ApiRequest,
        logger: &StructuredLogger,
    ) -> ApiResponse {
        logger
            .info_builder("Request received")
            .field("method", request.method.as_str())
            .field("path", request.path.as_str())
            .emit();

        let route = Route::resolve(&request.method, &request.path, &self.config.collection);
        logger
            .debug_builder("Route resolved")
            .field("route", route.name())
            .emit();

        let response = match self.dispatch(route, request) {
            Ok(response) => response,
            Err(error) => {
                let status = error.status_code();
                if status >= 500 {
                    logger
                        .error_builder("Request failed")
                        .field("error", error.to_string())
                        .emit();
                } else {
                    logger
                        .warn_builder("Request rejected")
                        .field_i64("status", i64::from(status))
                        .field("error", error.to_string())
                        .emit();
                }
                ApiResponse::error(&error)
            }
        };

        logger
            .info_builder("Request complete")
            .field_i64("status", i64::from(response.status))
            .emit();

        response.with_header("x-request-id", request.request_id.to_string())
    }

    fn dispatch(&self, route: Route, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        match route {
            Route::Preflight => Ok(ApiResponse::empty(200)),
            Route::Create => self.create(request),
            Route::List => self.list(),
            Route::Get(id) => self.get(&id),
            Route::Update(id) => self.update(&id, request),
            Route::Delete(id) => self.delete(&id),
            Route::Unsupported(method) => Err(ApiError::MethodNotAllowed(method.to_string())),
        }
    }

    fn create(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let body: CreateProductBody = decode_body(request.body_text()?)?;
        let new = body.validate()?;

        let product = Product::create(ProductId::generate(), new, self.clock.now());
        self.store.put(&product).map_err(store_error)?;

        ApiResponse::json(
            201,
            &Created {
                mensagem: "Produto criado com sucesso",
                produto: &product,
            },
        )
    }

    fn list(&self) -> Result<ApiResponse, ApiError> {
        let products = self.store.scan().map_err(store_error)?;
        ApiResponse::json(200, &products)
    }

    fn get(&self, id: &ProductId) -> Result<ApiResponse, ApiError> {
        match self.store.get(id).map_err(store_error)? {
            Some(product) => ApiResponse::json(200, &product),
            None => Err(ApiError::not_found()),
        }
    }

    fn update(&self, id: &ProductId, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        if self.store.get(id).map_err(store_error)?.is_none() {
            return Err(ApiError::not_found());
        }

        let body: UpdateProductBody = decode_body(request.body_text()?)?;
        let patch = body.validate()?;

        self.store
            .update(id, &patch, self.clock.now())
            .map_err(store_error)?;

        Ok(ApiResponse::message(200, "Atualizado com sucesso"))
    }

    fn delete(&self, id: &ProductId) -> Result<ApiResponse, ApiError> {
        self.store.delete(id).map_err(store_error)?;
        Ok(ApiResponse::message(200, "Deletado com sucesso"))
    }
}

fn store_error(error: StoreError) -> ApiError {
    match error {
        StoreError::NotFound(_) => ApiError::not_found(),
        other => ApiError::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use produtos_core::{ManualClock, Method};
    use produtos_observability::LogSink;
    use produtos_store::{KvRecordStore, MemoryBackend};

    fn handler() -> RequestHandler<KvRecordStore<MemoryBackend>, ManualClock> {
        RequestHandler::new(
            KvRecordStore::with_default_prefix(MemoryBackend::new()),
            ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            HandlerConfig::default(),
        )
    }

    /// Store whose every call fails.
    struct Broken;

    impl RecordStore for Broken {
        fn get(&self, _: &ProductId) -> Result<Option<Product>, StoreError> {
            Err(StoreError::Backend("table unavailable".into()))
        }
        fn put(&self, _: &Product) -> Result<(), StoreError> {
            Err(StoreError::Backend("table unavailable".into()))
        }
        fn update(
            &self,
            _: &ProductId,
            _: &produtos_core::ProductPatch,
            _: chrono::DateTime<Utc>,
        ) -> Result<Product, StoreError> {
            Err(StoreError::Backend("table unavailable".into()))
        }
        fn delete(&self, _: &ProductId) -> Result<(), StoreError> {
            Err(StoreError::Backend("table unavailable".into()))
        }
        fn scan(&self) -> Result<Vec<Product>, StoreError> {
            Err(StoreError::Backend("table unavailable".into()))
        }
    }

    fn broken() -> RequestHandler<Broken, ManualClock> {
        RequestHandler::new(Broken, ManualClock::new(Utc::now()), HandlerConfig::default())
    }

    #[test]
    fn test_preflight_skips_store() {
        let handler = broken();
        let resp = handler.handle(&ApiRequest::new(Method::Options, "/produtos"));
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "");
    }

    #[test]
    fn test_store_failure_is_500_with_message() {
        let handler = broken();
        for req in [
            ApiRequest::new("GET", "/produtos"),
            ApiRequest::new("GET", "/produtos/x"),
            ApiRequest::new("DELETE", "/produtos/x"),
            ApiRequest::new("PUT", "/produtos/x").with_body(r#"{"quantity": 1}"#),
            ApiRequest::new("POST", "/produtos")
                .with_body(r#"{"name": "A", "price": 1, "quantity": 1}"#),
        ] {
            let resp = handler.handle(&req);
            assert_eq!(resp.status, 500, "{} {}", req.method, req.path);
            assert_eq!(
                resp.json_body().unwrap()["erro"],
                "Store operation failed: table unavailable"
            );
        }
    }

    #[test]
    fn test_create_uses_clock_for_both_stamps() {
        let handler = handler();
        let resp = handler.handle(
            &ApiRequest::new("POST", "/produtos")
                .with_body(r#"{"name": "Widget", "price": 9.99, "quantity": 5}"#),
        );
        let body = resp.json_body().unwrap();
        assert_eq!(body["produto"]["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(body["produto"]["updated_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_response_carries_request_id() {
        let handler = handler();
        let req = ApiRequest::new("GET", "/produtos")
            .with_request_id(produtos_core::RequestId::from_string("req-42"));
        let resp = handler.handle(&req);
        assert_eq!(resp.header("x-request-id"), Some("req-42"));
    }

    #[test]
    fn test_logs_rejections_and_failures() {
        let handler = handler();
        let sink = LogSink::buffer();
        let req = ApiRequest::new("GET", "/produtos/ghost");
        let logger = handler.logger_for(&req).with_sink(sink.clone());

        let resp = handler.handle_with_logger(&req, &logger);
        assert_eq!(resp.status, 404);

        let lines = sink.lines();
        assert!(lines.iter().any(|l| l.contains("Request rejected")));
        assert!(lines.iter().any(|l| l.contains("Request complete")));
    }
}
