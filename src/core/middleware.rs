use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use chrono::Local;
use lazy_static::lazy_static;
use regex::Regex;
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_sessions::Session;
use tracing::Span;
use uuid::Uuid;

use crate::core::config::UserAgentBlocksConfig;
use crate::core::error::AppError;
use crate::core::ratelimit::{Admission, RateLimiter};
use crate::features::auth::session::{self, Alert};

lazy_static! {
    // Strict dotted-quad only. Anything looser (ports, IPv6, hostnames)
    // falls through to the transport peer address.
    static ref IPV4_REGEX: Regex = Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
    )
    .unwrap();
}

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// User-agent block list, compiled once at startup. Patterns are literal
/// fragments from config; metacharacters are escaped so `bot[1.0]` matches
/// the text `bot[1.0]`, then tested case-insensitively as substrings.
pub struct UserAgentBlocker {
    enabled: bool,
    patterns: Vec<Regex>,
}

impl UserAgentBlocker {
    pub fn from_config(config: &UserAgentBlocksConfig) -> Result<Self, String> {
        let patterns = config
            .user_agents
            .iter()
            .map(|ua| {
                Regex::new(&format!("(?i){}", regex::escape(ua)))
                    .map_err(|e| format!("Invalid user agent pattern '{}': {}", ua, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enabled: config.enabled,
            patterns,
        })
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn matches(&self, user_agent: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(user_agent))
    }
}

/// First admission gate: reject requests from known-unwanted user agents.
pub async fn block_user_agents(
    State(blocker): State<Arc<UserAgentBlocker>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if blocker.enabled() {
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if blocker.matches(user_agent) {
            return Err(AppError::NotAcceptable("Not Acceptable".to_string()));
        }
    }

    Ok(next.run(req).await)
}

/// Determine the client address for rate limiting.
///
/// x-forwarded-for can be spoofed, but the frontend webserver appends the
/// real address at the end of the list, so only the last comma-separated
/// entry is trusted. The entry must be a strict IPv4 string; otherwise
/// (or when the header is absent, e.g. not running behind a proxy) the
/// transport peer address is used.
pub fn client_ip(req: &Request) -> Option<String> {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next_back())
        .map(|v| v.trim().to_string());

    if let Some(ip) = forwarded {
        if IPV4_REGEX.is_match(&ip) {
            return Some(ip);
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Second admission gate: per-IP request rate limiting.
pub async fn enforce_ratelimits(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if limiter.enabled() {
        // No usable address is a hard stop, not a silent allow.
        let ip = client_ip(&req)
            .ok_or_else(|| AppError::BadRequest("Bad Request".to_string()))?;

        let now = Local::now().timestamp();
        match limiter
            .check(&ip, now)
            .map_err(|e| AppError::Internal(format!("Rate limit cache failure: {}", e)))?
        {
            Admission::Limited => {
                tracing::warn!("Rate limited request from {}", ip);
                return Err(AppError::RateLimited("Too Many Requests".to_string()));
            }
            Admission::Allowed => {}
        }
    }

    Ok(next.run(req).await)
}

/// Session-auth guard for protected routes. API paths get a 401 JSON body;
/// browser paths are sent back to the login page with a flash alert.
pub async fn require_session_auth(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(user) = session::authenticated_user(&session).await? {
        req.extensions_mut().insert(user);
        return Ok(next.run(req).await);
    }

    if req.uri().path().contains("/api/") {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    }

    session::set_alert(
        &session,
        Alert::info("Please log in to continue"),
    )
    .await?;
    Ok(Redirect::to("/login").into_response())
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")
                .body(Body::from("Unauthorized"))
                .unwrap();

            Err(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_forwarded(value: Option<&str>, peer: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header("x-forwarded-for", v);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        if let Some(p) = peer {
            let addr: SocketAddr = p.parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn client_ip_trusts_last_forwarded_entry() {
        let req = request_with_forwarded(Some("1.2.3.4, 5.6.7.8"), None);
        assert_eq!(client_ip(&req), Some("5.6.7.8".to_string()));
    }

    #[test]
    fn client_ip_accepts_single_forwarded_entry() {
        let req = request_with_forwarded(Some("203.0.113.9"), None);
        assert_eq!(client_ip(&req), Some("203.0.113.9".to_string()));
    }

    #[test]
    fn client_ip_rejects_invalid_forwarded_and_falls_back_to_peer() {
        let req = request_with_forwarded(Some("not-an-ip"), Some("192.168.1.20:54321"));
        assert_eq!(client_ip(&req), Some("192.168.1.20".to_string()));

        let req = request_with_forwarded(Some("999.1.1.1"), Some("192.168.1.20:54321"));
        assert_eq!(client_ip(&req), Some("192.168.1.20".to_string()));
    }

    #[test]
    fn client_ip_is_none_without_header_or_peer() {
        let req = request_with_forwarded(None, None);
        assert_eq!(client_ip(&req), None);
    }

    #[test]
    fn ua_blocker_escapes_metacharacters() {
        let blocker = UserAgentBlocker::from_config(&UserAgentBlocksConfig {
            enabled: true,
            user_agents: vec!["bot[1.0]".to_string()],
        })
        .unwrap();

        assert!(blocker.matches("bot[1.0]/crawler"));
        assert!(blocker.matches("BOT[1.0]/Crawler"));
        assert!(!blocker.matches("bot1.0/crawler"));
        assert!(!blocker.matches("Mozilla/5.0"));
    }

    #[test]
    fn ua_blocker_matches_substring_case_insensitively() {
        let blocker = UserAgentBlocker::from_config(&UserAgentBlocksConfig {
            enabled: true,
            user_agents: vec!["badbot".to_string(), "scraper".to_string()],
        })
        .unwrap();

        assert!(blocker.matches("Mozilla/5.0 (compatible; BadBot/2.1)"));
        assert!(blocker.matches("my-Scraper-agent"));
        assert!(!blocker.matches("Mozilla/5.0 (X11; Linux x86_64)"));
    }

    #[tokio::test]
    async fn blocked_user_agent_is_refused_end_to_end() {
        use axum::{routing::get, Router};
        use tower::ServiceExt;

        let blocker = Arc::new(
            UserAgentBlocker::from_config(&UserAgentBlocksConfig {
                enabled: true,
                user_agents: vec!["badbot".to_string()],
            })
            .unwrap(),
        );
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                blocker,
                block_user_agents,
            ));

        let blocked = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header(header::USER_AGENT, "Mozilla/5.0 (compatible; BadBot/2.1)")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(blocked.status(), StatusCode::NOT_ACCEPTABLE);

        let allowed = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header(header::USER_AGENT, "Mozilla/5.0 (X11; Linux x86_64)")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unauthenticated_requests_are_refused_or_redirected() {
        use axum::{routing::get, Router};
        use tower::ServiceExt;
        use tower_sessions::{MemoryStore, SessionManagerLayer};

        let app = Router::new()
            .route("/api/message", get(|| async { "ok" }))
            .route("/settings/profile", get(|| async { "ok" }))
            .route_layer(axum::middleware::from_fn(require_session_auth))
            .layer(SessionManagerLayer::new(MemoryStore::default()));

        let api = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/message")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

        let browser = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/settings/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(browser.status(), StatusCode::SEE_OTHER);
        assert_eq!(browser.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
