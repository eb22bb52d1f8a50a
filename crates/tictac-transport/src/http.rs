//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tictac_protocol::{
    Codec, ErrorBody, JsonCodec, MoveAck, MoveRequest, MoveResponse,
};

use crate::{MoveTransport, TransportError, rejection_message, resolve_endpoint};

/// A [`MoveTransport`] that POSTs moves to `{base}/game/move`.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` around a connection pool.
#[derive(Debug, Clone)]
pub struct HttpMoveTransport<C: Codec = JsonCodec> {
    client: reqwest::Client,
    endpoint: String,
    codec: C,
}

impl HttpMoveTransport<JsonCodec> {
    /// Creates a JSON transport for the given API base.
    ///
    /// `origin` is only used when `api_base` is empty (same-origin mode).
    pub fn new(api_base: &str, origin: &str) -> Result<Self, TransportError> {
        Self::with_options(api_base, origin, JsonCodec, None)
    }
}

impl<C: Codec> HttpMoveTransport<C> {
    /// Creates a transport with an explicit codec and an optional
    /// per-request timeout enforced by the HTTP client.
    pub fn with_options(
        api_base: &str,
        origin: &str,
        codec: C,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let endpoint = resolve_endpoint(api_base, origin)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(Box::new(e)))?;

        tracing::debug!(%endpoint, "HTTP move transport ready");
        Ok(Self {
            client,
            endpoint,
            codec,
        })
    }

    /// The absolute URL moves are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<C: Codec> MoveTransport for HttpMoveTransport<C> {
    async fn submit_move(
        &self,
        request: MoveRequest,
    ) -> Result<MoveResponse, TransportError> {
        let body = self.codec.encode(&request)?;
        let content_type = self.codec.content_type();

        tracing::debug!(
            endpoint = %self.endpoint,
            session_id = %request.session_id,
            cell = request.cell_index,
            "posting move"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, content_type)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = rejection_message(
                &self.codec,
                status.as_u16(),
                status.canonical_reason(),
                &bytes,
            );
            tracing::debug!(status = status.as_u16(), %message, "move rejected");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // A 2xx body with `success: false` still means nothing was applied,
        // and it may carry no board or status. Check the flag before
        // decoding the full reply.
        let ack: MoveAck = self.codec.decode(&bytes)?;
        if !ack.success {
            let message = self
                .codec
                .decode::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.display_message())
                .unwrap_or_else(|| "move rejected by server".to_string());
            tracing::debug!(status = status.as_u16(), %message, "move refused");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MoveResponse = self.codec.decode(&bytes)?;
        Ok(reply)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::TimedOut
    } else {
        TransportError::Connection(Box::new(e))
    }
}
