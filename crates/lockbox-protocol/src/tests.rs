#[cfg(test)]
mod tests {
    use crate::backend::read_response;
    use crate::frame::{read_frame, write_frame, MAX_FRAME_LEN};
    use crate::frontend::{encode_request, write_request};
    use crate::messages::{Command, Outcome, Query, Reply, Request, Response, SecretKey};
    use crate::server::{serve_connection, CommandHandler};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use lockbox_core::{BatchQuery, RawRow, Value};
    use tokio::io::{AsyncWriteExt, DuplexStream};

    struct FixedHandler;

    #[async_trait]
    impl CommandHandler for FixedHandler {
        async fn execute_single(&self, query: Query) -> Result<Vec<RawRow>> {
            if query.sql.starts_with("bad") {
                return Err(anyhow!("near \"bad\": syntax error"));
            }
            Ok(vec![RawRow::new(vec!["n".into()], query.params)])
        }

        async fn execute_batch(&self, queries: Vec<BatchQuery>) -> Result<Vec<Vec<RawRow>>> {
            Ok(queries.into_iter().map(|_| Vec::new()).collect())
        }

        async fn is_ready(&self) -> Result<bool> {
            Ok(true)
        }

        async fn initialize(&self, encryption_key: &str) -> Result<()> {
            if encryption_key == "secret" {
                Ok(())
            } else {
                Err(anyhow!("file is not a database"))
            }
        }

        async fn reset(&self, _purge_data: bool) -> Result<()> {
            Ok(())
        }
    }

    fn spawn_server() -> DuplexStream {
        let (client, mut server) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            serve_connection(&mut server, &FixedHandler).await.expect("serve");
        });
        client
    }

    async fn send(client: &mut DuplexStream, id: u64, command: Command) -> Response {
        write_request(client, &Request { id, command }).await.expect("write");
        read_response(client).await.expect("read").expect("response")
    }

    #[tokio::test]
    async fn frame_survives_duplex() {
        let (mut client, mut server) = tokio::io::duplex(64);
        write_frame(&mut client, b"{\"id\":1}").await.expect("write");
        let frame = read_frame(&mut server).await.expect("read");
        assert_eq!(frame.as_deref(), Some(&b"{\"id\":1}"[..]));
    }

    #[tokio::test]
    async fn clean_close_reads_as_none() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        assert!(read_frame(&mut server).await.expect("read").is_none());
    }

    #[tokio::test]
    async fn truncated_header_is_an_error_not_a_close() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&[0, 0]).await.expect("write");
        drop(client);
        assert!(read_frame(&mut server).await.is_err());
    }

    #[tokio::test]
    async fn serve_reports_a_half_written_request() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&[0, 0, 1]).await.expect("write");
        drop(client);
        assert!(serve_connection(&mut server, &FixedHandler).await.is_err());
    }

    #[tokio::test]
    async fn oversized_frame_header_is_rejected() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client
            .write_all(&((MAX_FRAME_LEN as u32) + 1).to_be_bytes())
            .await
            .expect("write");
        assert!(read_frame(&mut server).await.is_err());
    }

    #[test]
    fn init_command_wire_shape_and_redaction() {
        let request = Request {
            id: 9,
            command: Command::InitDb {
                encryption_key: SecretKey::new("hunter2"),
            },
        };
        let json = String::from_utf8(encode_request(&request).expect("encode")).expect("utf8");
        assert_eq!(
            json,
            r#"{"id":9,"command":{"name":"init_db","encryption_key":"hunter2"}}"#
        );
        assert!(!format!("{request:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn serve_answers_each_request_with_its_id() {
        let mut client = spawn_server();
        let response = send(
            &mut client,
            41,
            Command::ExecuteSingleSql {
                query: Query {
                    sql: "select ?".into(),
                    params: vec![Value::Integer(5)],
                },
            },
        )
        .await;
        assert_eq!(response.id, 41);
        assert_eq!(
            response.outcome,
            Outcome::Ok {
                reply: Reply::Rows(vec![RawRow::new(vec!["n".into()], vec![Value::Integer(5)])])
            }
        );

        let response = send(&mut client, 42, Command::IsDbReady).await;
        assert_eq!(response, Response::ok(42, Reply::Ready(true)));
    }

    #[tokio::test]
    async fn handler_failure_is_sent_verbatim() {
        let mut client = spawn_server();
        let response = send(
            &mut client,
            3,
            Command::InitDb {
                encryption_key: SecretKey::new("wrong"),
            },
        )
        .await;
        assert_eq!(response, Response::err(3, "file is not a database"));
    }

    #[tokio::test]
    async fn malformed_frame_gets_error_and_connection_stays_open() {
        let mut client = spawn_server();
        write_frame(&mut client, b"not json").await.expect("write");
        let response = read_response(&mut client).await.expect("read").expect("response");
        assert_eq!(response.id, 0);
        assert!(matches!(response.outcome, Outcome::Err { .. }));

        let response = send(&mut client, 5, Command::ResetDb { purge_data: false }).await;
        assert_eq!(response, Response::ok(5, Reply::Done));
    }
}
