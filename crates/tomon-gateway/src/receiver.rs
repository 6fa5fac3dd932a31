//! One connection attempt
//!
//! Dial, identify, then read frames until the socket closes, errors, or is
//! terminated locally (heartbeat timeout or `close()`).

use std::sync::Arc;

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;

use crate::client::GatewayShared;
use crate::connection::{ConnectionState, GatewaySocket, WsSource};
use crate::error::{GatewayError, GatewayResult};
use crate::handlers::FrameHandler;
use crate::protocol::GatewayMessage;

/// Run one attempt; `Ok(true)` when the identity ack arrived before the end
pub async fn run_connection(shared: Arc<GatewayShared>) -> GatewayResult<bool> {
    shared.state.set(ConnectionState::Connecting);
    tracing::info!(url = %shared.config.url, "Connecting to gateway");

    let (socket, source) = GatewaySocket::connect(&shared.config.url).await?;

    if !shared.session.attach_socket(socket.clone()) {
        tracing::debug!("Client closed while dialing, dropping new socket");
        socket.close(CloseCode::Normal).await;
        return Err(GatewayError::Closed);
    }

    let result = receive(&shared, &socket, source).await;
    shared.session.detach_socket(&socket);
    socket.terminate();
    result
}

async fn receive(
    shared: &Arc<GatewayShared>,
    socket: &Arc<GatewaySocket>,
    mut source: WsSource,
) -> GatewayResult<bool> {
    shared.state.set(ConnectionState::Identifying);
    socket
        .send_message(&GatewayMessage::identify(shared.session.token()))
        .await?;
    tracing::debug!("Identify sent");

    let mut handler = FrameHandler::new(shared.clone(), socket.clone());
    let mut shutdown = socket.shutdown_signal();

    loop {
        tokio::select! {
            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => handler.handle_text(&text).await,
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(frame = ?frame, "Gateway closed the connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Gateway socket error");
                    break;
                }
                None => {
                    tracing::info!("Gateway stream ended");
                    break;
                }
            },
            () = async { let _ = shutdown.wait_for(|stop| *stop).await; } => {
                tracing::debug!("Connection terminated locally");
                break;
            }
        }
    }

    Ok(handler.is_synced())
}
