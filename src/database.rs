use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Database
///
/// Connection lifecycle of the API service's backing store. The service holds
/// no data yet, so the only contract is connect/disconnect and a liveness flag
/// for the health endpoint.
#[async_trait]
pub trait Database: Send + Sync {
    async fn connect(&self);
    async fn disconnect(&self);
    fn is_connected(&self) -> bool;
}

pub type DatabaseState = Arc<dyn Database>;

/// InMemoryDatabase
///
/// Stand-in store. Both transitions are idempotent.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    connected: AtomicBool,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn connect(&self) {
        if self.connected.swap(true, Ordering::SeqCst) {
            tracing::debug!("connect called on an already connected database");
        }
    }

    async fn disconnect(&self) {
        if !self.connected.swap(false, Ordering::SeqCst) {
            tracing::debug!("disconnect called on a database that was not connected");
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
