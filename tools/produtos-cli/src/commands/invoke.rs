//! Send one request through the handler.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context as _, Result};
use produtos_api::{ApiResponse, RequestHandler};
use produtos_core::{ApiRequest, SystemClock};
use produtos_observability::LogLevel;
use produtos_store::KvRecordStore;
use serde::Serialize;

use super::InvokeArgs;
use crate::context::Context;
use crate::event::GatewayEvent;
use crate::output::status_badge;
use crate::store::FileBackend;

/// Gateway-style response object.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GatewayResponse<'a> {
    status_code: u16,
    headers: BTreeMap<&'a str, &'a str>,
    body: &'a str,
}

/// Run the invoke command.
pub fn run(args: InvokeArgs, ctx: &Context) -> Result<()> {
    let request = build_request(&args, ctx)?;
    ctx.output
        .debug(&format!("{} {} ({})", request.method, request.path, request.request_id));

    let backend = FileBackend::open(&ctx.data_path)
        .with_context(|| format!("Failed to open table: {}", ctx.data_path.display()))?;
    ctx.output
        .debug(&format!("Table: {} ({} keys)", backend.path().display(), backend.len()));

    let mut config = ctx.config.handler.clone();
    if ctx.output.is_verbose() {
        config.log_level = LogLevel::Debug;
    }
    let store = KvRecordStore::new(backend, config.key_prefix.clone());
    let handler = RequestHandler::new(store, SystemClock, config);

    let response = handler.handle(&request);
    print_response(&response, ctx);

    Ok(())
}

fn build_request(args: &InvokeArgs, ctx: &Context) -> Result<ApiRequest> {
    if let Some(event_file) = &args.event {
        let path = ctx.resolve_path(event_file);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file: {}", path.display()))?;
        let event = GatewayEvent::from_json(&content)?;
        return Ok(event.into_request()?);
    }

    let body = match (&args.body, &args.body_file) {
        (Some(body), _) => body.clone().into_bytes(),
        (None, Some(file)) => {
            let path = ctx.resolve_path(file);
            fs::read(&path)
                .with_context(|| format!("Failed to read body file: {}", path.display()))?
        }
        (None, None) => Vec::new(),
    };

    Ok(ApiRequest::new(args.method.as_str(), args.path.as_str()).with_body(body))
}

fn print_response(response: &ApiResponse, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&GatewayResponse {
            status_code: response.status,
            headers: response
                .headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            body: &response.body,
        });
        return;
    }

    ctx.output.plain(&format!("HTTP {}", status_badge(response.status)));
    if ctx.output.is_verbose() {
        for (name, value) in &response.headers {
            ctx.output.kv(name, value);
        }
    }

    if response.body.is_empty() {
        return;
    }
    match response.json_body() {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => ctx.output.plain(&pretty),
            Err(_) => ctx.output.plain(&response.body),
        },
        Err(_) => ctx.output.plain(&response.body),
    }
}
