use crate::core::protocol::{JsonRpcError, JsonRpcResponse, PARSE_ERROR};
use crate::core::server::McpServer;
use crate::domain::ports::ArtApi;
use crate::utils::error::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve newline-delimited JSON-RPC until `reader` reaches EOF.
///
/// Requests are answered in arrival order, one at a time.
pub async fn serve<A, R, W>(server: &McpServer<A>, reader: R, mut writer: W) -> Result<()>
where
    A: ArtApi,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut handled = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        // A line that is not UTF-8 is a parse error for that line only.
        let response = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() {
                    continue;
                }
                handled += 1;
                server.handle_message(line).await
            }
            Err(e) => {
                handled += 1;
                tracing::warn!("Discarding line that is not valid UTF-8: {}", e);
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            writer.write_all(payload.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    tracing::info!("Input closed after {} messages, shutting down", handled);
    Ok(())
}

pub async fn serve_stdio<A: ArtApi>(server: &McpServer<A>) -> Result<()> {
    tracing::info!(
        "{} v{} listening on stdio",
        server.info().name,
        server.info().version
    );
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tools::ToolService;
    use crate::domain::ports::QueryParam;
    use async_trait::async_trait;
    use serde_json::json;

    struct NoApi;

    #[async_trait]
    impl ArtApi for NoApi {
        async fn fetch(&self, endpoint: &str, _params: &[QueryParam]) -> Result<Value> {
            panic!("unexpected request to {}", endpoint)
        }
    }

    fn server() -> McpServer<NoApi> {
        McpServer::new(ToolService::new(NoApi, 100))
    }

    #[tokio::test]
    async fn test_serve_answers_each_request_on_its_own_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();

        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0], json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
        assert_eq!(responses[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_the_loop() {
        let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"p\xffing\"}\n\
{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&server(), input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1], json!({"jsonrpc": "2.0", "id": 2, "result": {}}));
    }

    #[tokio::test]
    async fn test_notifications_only_writes_nothing() {
        let reader = tokio_test::io::Builder::new()
            .read(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .build();
        let writer = tokio_test::io::Builder::new().build();

        serve(&server(), reader, writer).await.unwrap();
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_api() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"get_artwork","arguments":{"artwork_id":"abc"}}}"#,
            "\n"
        );
        let mut output = Vec::new();

        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["result"]["isError"], true);
    }
}
