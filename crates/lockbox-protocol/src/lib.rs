pub mod backend;
pub mod frame;
pub mod frontend;
pub mod messages;
pub mod server;

pub use messages::{Command, Outcome, Query, Reply, Request, Response, SecretKey};
pub use server::{serve, serve_connection, CommandHandler};

#[cfg(test)]
mod tests;
