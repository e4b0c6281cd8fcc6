use crate::config::RouteConfig;
use crate::executor::CommandExecutor;
use crate::gate::ReadinessGate;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect {
        to: String,
        /// Where to return once the database is unlocked.
        redirect_to: Option<String>,
    },
}

/// Decides where navigation may go based on database readiness.
#[derive(Debug)]
pub struct RouteGuard<E: ?Sized> {
    gate: Arc<ReadinessGate<E>>,
    routes: RouteConfig,
}

impl<E: CommandExecutor + ?Sized> RouteGuard<E> {
    pub fn new(gate: Arc<ReadinessGate<E>>, routes: RouteConfig) -> Self {
        Self { gate, routes }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// Guard for data-bearing views: locked sessions go to the setup view.
    pub async fn protect(&self, location: &str) -> Navigation {
        if self.gate.check_ready().await {
            return Navigation::Proceed;
        }
        debug!(location, "database locked, redirecting to setup");
        Navigation::Redirect {
            to: self.routes.setup.clone(),
            redirect_to: Some(location.to_string()),
        }
    }

    /// Guard for the setup view itself: unlocked sessions go home.
    pub async fn prevent(&self) -> Navigation {
        if self.gate.check_ready().await {
            Navigation::Redirect {
                to: self.routes.home.clone(),
                redirect_to: None,
            }
        } else {
            Navigation::Proceed
        }
    }

    /// Where to go after an unlock or reset attempt settles.
    pub async fn landing(&self) -> Navigation {
        let to = if self.gate.check_ready().await {
            self.routes.home.clone()
        } else {
            self.routes.setup.clone()
        };
        Navigation::Redirect {
            to,
            redirect_to: None,
        }
    }
}
