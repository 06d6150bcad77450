//! Drives a live server over a real WebSocket connection.

use futures_util::{SinkExt, StreamExt};
use image::{Rgba, RgbaImage};
use lumen_server::{Backend, data_url, ws_server};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

async fn start() -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(ws_server::serve(listener, Backend::Parallel, async move {
        let _ = rx.await;
    }));
    (format!("ws://{addr}"), tx)
}

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn round_trip(ws: &mut Client, request: Value) -> Value {
    ws.send(Message::Text(request.to_string().into())).await.unwrap();
    loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_grade_over_websocket() {
    let (url, shutdown) = start().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();

    let source = RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 255]));
    let reply = round_trip(
        &mut ws,
        json!({
            "id": 1,
            "type": "grade",
            "data": {
                "imageData": data_url::encode_png(&source).unwrap(),
                "adjustments": { "contrast": 50, "unknown": 3 },
            },
        }),
    )
    .await;

    assert_eq!(reply["id"], 1);
    assert_eq!(reply["type"], "image");
    assert_eq!(reply["data"]["width"], 2);
    let graded = data_url::decode(reply["data"]["imageUrl"].as_str().unwrap()).unwrap();
    assert!(graded.pixels().all(|p| p.0[0] >= 128 && p.0[3] == 255));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_errors_keep_connection_open() {
    let (url, shutdown) = start().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str()).await.unwrap();
    let source = data_url::encode_png(&RgbaImage::from_pixel(3, 1, Rgba([9, 9, 9, 255]))).unwrap();

    let reply = round_trip(
        &mut ws,
        json!({ "id": 2, "type": "grade", "data": { "imageData": source, "adjustments": { "exposure": "loud" } } }),
    )
    .await;
    assert_eq!(reply["id"], 2);
    assert_eq!(reply["type"], "error");

    let reply = round_trip(&mut ws, json!({ "id": 3, "type": "flip", "data": { "imageData": source } })).await;
    assert_eq!(reply["id"], 3);
    assert_eq!(reply["type"], "image");
    assert_eq!(reply["data"]["width"], 3);

    let _ = shutdown.send(());
}
