use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;

use app::error::AppError;

use crate::error::ApiError;

/// Windows are swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 10_000;

/// Fixed-window request counter keyed by client.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, WindowEntry>>>,
    max_requests: u32,
    window: Duration,
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Counts a request for `key`; `false` once the window's budget is spent.
    pub async fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, e| e.reset_at > now);
        }

        let entry = windows.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            reset_at: now + self.window,
        });
        if now >= entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }
}

fn client_key(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return format!("ip:{}", addr.ip());
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| format!("ip:{}", ip.trim()))
        .unwrap_or_else(|| "ip:unknown".to_string())
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&req);
    if !limiter.check(&key).await {
        tracing::debug!(client = %key, "Rate limit exceeded");
        return Err(AppError::RateLimited.into());
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn budget_is_per_client_and_per_window() {
        let limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("a").await);
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);
        assert!(limiter.check("b").await);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(limiter.check("a").await);
    }
}
