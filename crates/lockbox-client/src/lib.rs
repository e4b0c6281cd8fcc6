pub mod config;
pub mod executor;
pub mod gate;
pub mod guard;
pub mod proxy;
pub mod session;
pub mod stream;

pub use config::{ClientConfig, ExecutorConfig, RouteConfig};
pub use executor::CommandExecutor;
pub use gate::ReadinessGate;
pub use guard::{Navigation, RouteGuard};
pub use proxy::{RemoteDriver, StatementProxy};
pub use session::Session;
pub use stream::StreamExecutor;
