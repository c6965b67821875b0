use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

const SVTPLAY_BASE: &str = "https://www.svtplay.se";

/// Public SVT Play URL for a pointer id (`/video/abc` or a bare `abc`)
pub fn svtplay_url(id: &str) -> String {
    if id.starts_with('/') {
        format!("{}{}", SVTPLAY_BASE, id)
    } else {
        format!("{}/video/{}", SVTPLAY_BASE, id)
    }
}

/// Hands SVT Play URLs to an external player endpoint (`GET <endpoint>?url=...`)
#[derive(Debug, Clone)]
pub struct SvtplayForwarder {
    endpoint: Url,
    client: reqwest::Client,
}

impl SvtplayForwarder {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid svtplay endpoint {}: {}", endpoint, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// Request URL for forwarding `url`
    pub fn request_url(&self, url: &str) -> Url {
        let mut request = self.endpoint.clone();
        request.query_pairs_mut().append_pair("url", url);
        request
    }

    /// Forward `url`; any non-2xx answer or transport failure is a bad gateway
    pub async fn forward(&self, url: &str) -> Result<()> {
        let request = self.request_url(url);
        tracing::info!("Forwarding SVT Play URL to {}", request);

        let response = self.client.get(request).send().await.map_err(|e| {
            tracing::warn!("SVT Play endpoint request failed: {}", e);
            Error::BadGateway("svtplay endpoint unreachable".to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("SVT Play endpoint answered {}", status);
            return Err(Error::BadGateway(format!("svtplay endpoint answered {}", status)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svtplay_url() {
        assert_eq!(svtplay_url("/video/abc"), "https://www.svtplay.se/video/abc");
        assert_eq!(svtplay_url("abc"), "https://www.svtplay.se/video/abc");
    }

    #[test]
    fn test_request_url_escapes_target() {
        let forwarder =
            SvtplayForwarder::new("http://example.local/play", Duration::from_secs(1)).unwrap();
        let request = forwarder.request_url("https://www.svtplay.se/video/abc?video=visa");
        assert_eq!(
            request.as_str(),
            "http://example.local/play?url=https%3A%2F%2Fwww.svtplay.se%2Fvideo%2Fabc%3Fvideo%3Dvisa"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(SvtplayForwarder::new("nope", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_bad_gateway() {
        // Bind and drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let forwarder =
            SvtplayForwarder::new(&format!("http://{}/play", addr), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            forwarder.forward("https://www.svtplay.se/x").await,
            Err(Error::BadGateway(_))
        ));
    }
}
