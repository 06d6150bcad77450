//! WebSocket transport.
//!
//! Each client connection gets its own task. Frames on one connection are
//! answered in order; grading runs on tokio's blocking pool so the reactor
//! keeps serving other clients while pixels are crunched.

use std::future::Future;
use std::net::SocketAddr;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::{self, Backend};
use crate::protocol::Response;

/// Bind the listener described by `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("WebSocket server listening on ws://{}", listener.local_addr()?);
    Ok(listener)
}

/// Accept clients until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    backend: Backend,
    shutdown: impl Future<Output = ()>,
) -> Result<(), ServerError> {
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_connection(stream, peer, backend));
                    }
                    Err(e) => tracing::error!("failed to accept connection: {e}"),
                }
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, backend: Backend) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::error!("WebSocket handshake with {peer} failed: {e}");
            return;
        }
    };
    tracing::info!("WebSocket client connected: {peer}");

    let (mut ws_sink, mut ws_source) = ws_stream.split();
    while let Some(frame) = ws_source.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Binary(_)) => {
                let err = ServerError::bad_request("binary frames are not supported");
                if send(&mut ws_sink, &Response::error(None, &err)).await.is_err() {
                    break;
                }
                continue;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("WebSocket error from {peer}: {e}");
                break;
            }
        };

        let response = match tokio::task::spawn_blocking(move || handler::handle_text(&text, backend)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("request task for {peer} failed: {e}");
                Response::error(None, &ServerError::from(e))
            }
        };
        if send(&mut ws_sink, &response).await.is_err() {
            break;
        }
    }

    tracing::info!("WebSocket client disconnected: {peer}");
}

type WsSink = SplitSink<WebSocketStream<TcpStream>, Message>;

async fn send(sink: &mut WsSink, response: &Response) -> Result<(), ServerError> {
    let json = serde_json::to_string(response)?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}

/// Bind and serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = bind(&config).await?;
    let backend = Backend::from_flag(config.parallel);
    tracing::info!(?backend, "grading backend selected");
    serve(listener, backend, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await
}
