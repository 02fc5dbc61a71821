//! Newline-delimited JSON-RPC transport.
//!
//! One message per line in each direction. Requests are handled one at a
//! time, in arrival order.

use crate::{McpError, McpServer};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(server: &McpServer, reader: R, mut writer: W) -> Result<(), McpError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = server.handle_message(&line).await {
            let mut bytes = serde_json::to_vec(&response)?;
            bytes.push(b'\n');
            writer.write_all(&bytes).await?;
            writer.flush().await?;
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Serve over the process's stdin and stdout.
pub async fn serve_stdio(server: &McpServer) -> Result<(), McpError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(server, stdin, stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_executor::{DockerTools, MockInvoker, ProcessOutput};
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    async fn session_over_in_memory_pipe() {
        let mock = Arc::new(MockInvoker::new());
        mock.push_response(ProcessOutput::ok("CONTAINER ID   IMAGE\n"));
        let server = McpServer::new("docker-manager", "0.1.0", DockerTools::new(mock.clone()));

        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_containers","arguments":{"all":true}}}"#,
            "\n",
            "garbage\n",
        );

        let mut output = Vec::new();
        serve(&server, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(
            responses[1]["result"]["structuredContent"]["result"],
            "CONTAINER ID   IMAGE"
        );
        assert!(responses[2]["id"].is_null());
        assert_eq!(responses[2]["error"]["code"], -32700);

        assert_eq!(mock.calls(), vec![vec!["docker", "ps", "-a"]]);
    }
}
