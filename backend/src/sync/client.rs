use common::model::ticket::TicketPayload;
use log::debug;
use reqwest::blocking::Client;
use thiserror::Error;

/// The request never produced an HTTP response (DNS, connect, TLS, body read).
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}

/// Status and raw body of a ticket API response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// The remote ticket API.
///
/// Non-2xx responses are returned as values, not errors: callers decide what
/// a status means.
pub trait TicketApi: Send {
    fn create_ticket(&self, payload: &TicketPayload) -> Result<ApiResponse, TransportError>;
}

/// Blocking HTTP client for `POST /tickets/from-sheet`.
///
/// Must be built and used off the async runtime; the sync worker owns it on
/// its own thread.
pub struct HttpTicketClient {
    client: Client,
    endpoint: String,
}

impl HttpTicketClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }
}

impl TicketApi for HttpTicketClient {
    fn create_ticket(&self, payload: &TicketPayload) -> Result<ApiResponse, TransportError> {
        debug!("POST {} for property {}", self.endpoint, payload.property_id);
        let response = self.client.post(&self.endpoint).json(payload).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }
}
