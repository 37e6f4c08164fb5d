use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use luckyball_core::Ticket;

use crate::config::AppConfig;
use crate::service;

/// Inclusive bounds on the per-request ticket count.
pub const MIN_TICKETS: usize = 1;
pub const MAX_TICKETS: usize = 100;

#[derive(Clone)]
pub struct HttpServer {
    config: Arc<AppConfig>,
    addr: SocketAddr,
}

impl HttpServer {
    pub fn new(config: AppConfig) -> Self {
        Self::with_config(config, &HttpServerConfig::from_env())
    }

    pub fn with_config(config: AppConfig, server_config: &HttpServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            addr: server_config.socket_addr(),
        }
    }

    pub async fn start(&self) -> anyhow::Result<tokio::task::JoinHandle<()>> {
        let addr = self.addr;
        let app = build_router(self.config.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("HTTP server listening on {addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("HTTP server stopped: {e}");
            }
        });

        Ok(handle)
    }
}

#[derive(Default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl HttpServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("LUCKYBALL_HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = std::env::var("LUCKYBALL_HTTP_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);
        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }
}

#[derive(Clone)]
struct RouterState {
    config: Arc<AppConfig>,
}

/// The router is public so tests can drive it on an ephemeral listener.
pub fn build_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/luckynumbers/:count", get(lucky_numbers))
        .with_state(RouterState { config })
}

#[derive(Serialize)]
struct ApiResponse {
    success: bool,
    data: Option<Value>,
    error: Option<ApiError>,
}

#[derive(Serialize)]
struct ApiError {
    code: &'static str,
    message: String,
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn ok_value(value: Value) -> ApiResult {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(value),
            error: None,
        }),
    )
}

fn err_response(status: StatusCode, code: &'static str, message: impl Into<String>) -> ApiResult {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }),
    )
}

async fn health() -> ApiResult {
    ok_value(json!({"status": "ok"}))
}

#[derive(Serialize)]
struct TicketPayload {
    numbers: [u8; 5],
    powerball: u8,
}

impl From<&Ticket> for TicketPayload {
    fn from(ticket: &Ticket) -> Self {
        Self {
            numbers: ticket.primary,
            powerball: ticket.secondary,
        }
    }
}

async fn lucky_numbers(State(state): State<RouterState>, Path(count): Path<usize>) -> ApiResult {
    // Validation failures share the server-error status with upstream
    // failures; the API exposes no distinct client-error status.
    if count < MIN_TICKETS || count > MAX_TICKETS {
        return err_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "bad_count",
            format!("ticket count must be between {MIN_TICKETS} and {MAX_TICKETS}"),
        );
    }

    match service::generate_tickets(&state.config, count).await {
        Ok(tickets) => {
            let payload: Vec<TicketPayload> = tickets.iter().map(TicketPayload::from).collect();
            ok_value(json!({
                "requested_tickets": count,
                "lucky_numbers": payload,
            }))
        }
        Err(e) => {
            log::error!("ticket generation failed: {e:#}");
            err_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream",
                e.to_string(),
            )
        }
    }
}
