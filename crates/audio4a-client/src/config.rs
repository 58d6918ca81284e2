use crate::error::ClientError;

/// Validated connection settings for one service session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    port: u16,
    token: String,
}

impl Config {
    /// Requires a positive port and a non-empty authentication token.
    pub fn new(port: u16, token: &str) -> Result<Self, ClientError> {
        if port == 0 {
            return Err(ClientError::Config("port must be positive".into()));
        }
        if token.is_empty() {
            return Err(ClientError::Config("token must not be empty".into()));
        }
        Ok(Self {
            port,
            token: token.to_string(),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The websocket endpoint the service listens on. The shape is fixed by
    /// the service: local host, `/api` path, token as a query parameter.
    pub fn endpoint_uri(&self) -> String {
        format!("ws://localhost:{}/api?token={}", self.port, self.token)
    }
}
