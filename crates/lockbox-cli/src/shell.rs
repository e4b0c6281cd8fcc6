use crate::args::ShellCommand;
use anyhow::Context;
use lockbox_client::{CommandExecutor, Navigation, RemoteDriver, Session};
use lockbox_core::{Statement, Value};
use serde_json::json;
use tracing::info;

pub fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Text(raw.to_string()))
}

/// Runs one command and renders its outcome as JSON.
pub async fn run<E: CommandExecutor + ?Sized>(
    session: &Session<E>,
    command: ShellCommand,
) -> anyhow::Result<String> {
    let output = match command {
        ShellCommand::Status => {
            let ready = session.gate().check_ready().await;
            let next = match session.guard().landing().await {
                Navigation::Redirect { to, .. } => to,
                Navigation::Proceed => session.guard().routes().home.clone(),
            };
            json!({ "ready": ready, "route": next })
        }
        ShellCommand::Init { key } => {
            session.unlock(&key).await?;
            info!("database unlocked");
            json!({ "ready": session.gate().check_ready().await })
        }
        ShellCommand::Reset { purge } => {
            if purge {
                session.purge().await?;
            } else {
                session.logout().await?;
            }
            json!({ "ready": session.gate().check_ready().await, "purged": purge })
        }
        ShellCommand::Exec {
            sql,
            method,
            params,
        } => {
            let params = params.iter().map(|raw| parse_param(raw)).collect();
            let stmt = Statement::new(sql, params, method);
            serde_json::to_value(session.driver().execute_one(&stmt).await?)?
        }
        ShellCommand::Batch { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let stmts: Vec<Statement> = serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", file.display()))?;
            serde_json::to_value(session.driver().execute_batch(&stmts).await?)?
        }
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
