use redis::{aio::ConnectionManager, Client};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared Redis handle. The health reporter consults the recorded connection
/// state instead of issuing a live probe, so the flag reflects the last known
/// state of the link.
#[derive(Clone)]
pub struct RedisCache {
    manager: Option<ConnectionManager>,
    connected: Arc<AtomicBool>,
}

impl RedisCache {
    /// Handle for deployments with the cache turned off in configuration.
    pub fn disabled() -> Self {
        Self {
            manager: None,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Connect once at startup. A failed connection is recorded rather than
    /// propagated so the health endpoints can still report it.
    pub async fn connect(redis_url: &str) -> Self {
        tracing::info!("Creating Redis connection manager");

        let client = match Client::open(redis_url) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Invalid Redis URL: {}", e);
                return Self::disabled();
            }
        };

        match ConnectionManager::new(client).await {
            Ok(manager) => Self {
                manager: Some(manager),
                connected: Arc::new(AtomicBool::new(true)),
            },
            Err(e) => {
                tracing::warn!("Redis connection failed: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_some() && self.connected.load(Ordering::Relaxed)
    }

    pub fn manager(&self) -> Option<ConnectionManager> {
        self.manager.clone()
    }
}
