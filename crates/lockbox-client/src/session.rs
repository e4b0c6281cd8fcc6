use crate::config::{ClientConfig, RouteConfig};
use crate::executor::CommandExecutor;
use crate::gate::ReadinessGate;
use crate::guard::RouteGuard;
use crate::proxy::StatementProxy;
use crate::stream::StreamExecutor;
use lockbox_core::ProxyError;
use std::sync::Arc;

/// One application session: a statement proxy, readiness gate and route
/// guard sharing a single executor. Sessions share nothing with each other.
#[derive(Debug)]
pub struct Session<E: ?Sized> {
    proxy: StatementProxy<E>,
    gate: Arc<ReadinessGate<E>>,
    guard: RouteGuard<E>,
}

impl<E: CommandExecutor + ?Sized> Session<E> {
    pub fn new(executor: Arc<E>, routes: RouteConfig) -> Self {
        let gate = Arc::new(ReadinessGate::new(executor.clone()));
        Self {
            proxy: StatementProxy::new(executor),
            guard: RouteGuard::new(gate.clone(), routes),
            gate,
        }
    }

    pub fn driver(&self) -> &StatementProxy<E> {
        &self.proxy
    }

    pub fn gate(&self) -> &ReadinessGate<E> {
        &self.gate
    }

    pub fn guard(&self) -> &RouteGuard<E> {
        &self.guard
    }

    pub async fn unlock(&self, encryption_key: &str) -> Result<(), ProxyError> {
        self.gate.initialize(encryption_key).await
    }

    /// Drops the key; the data stays and can be reopened with it.
    pub async fn logout(&self) -> Result<(), ProxyError> {
        self.gate.reset(false).await
    }

    /// Drops the key and deletes the data.
    pub async fn purge(&self) -> Result<(), ProxyError> {
        self.gate.reset(true).await
    }
}

impl Session<StreamExecutor> {
    pub async fn connect(config: &ClientConfig) -> Result<Self, ProxyError> {
        let executor = StreamExecutor::connect(&config.executor.address).await?;
        Ok(Self::new(Arc::new(executor), config.routes.clone()))
    }
}
