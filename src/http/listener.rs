//! Port selection

use std::ops::Range;
use tokio::net::TcpListener;

use crate::error::{Result, ServerError};

/// Bind the first port in `ports` that is free on `host`
pub async fn bind_first_free(host: &str, ports: Range<u16>) -> Result<TcpListener> {
    let (start, end) = (ports.start, ports.end);
    for port in ports {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) => tracing::debug!("Port {} unavailable: {}", port, e),
        }
    }
    Err(ServerError::NoFreePort { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_skips_taken_port() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        match bind_first_free("127.0.0.1", port..port.saturating_add(20)).await {
            Ok(listener) => assert_ne!(listener.local_addr().unwrap().port(), port),
            // every neighbour may be busy on a loaded machine
            Err(ServerError::NoFreePort { start, .. }) => assert_eq!(start, port),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[tokio::test]
    async fn test_no_free_port() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = bind_first_free("127.0.0.1", port..port.saturating_add(1)).await.unwrap_err();
        assert!(matches!(err, ServerError::NoFreePort { .. }));
    }
}
