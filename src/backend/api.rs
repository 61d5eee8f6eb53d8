//! HTTP client for the media search endpoint

use reqwest::Client;
use url::Url;

use super::decode::decode_results;
use super::outcome::SearchOutcome;
use crate::config::Config;
use crate::error::SearchError;

/// Client for the search endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
    media: String,
}

/// Why a fetch produced no usable body
#[derive(Debug)]
enum FetchFailure {
    Network(reqwest::Error),
    Status(u16),
}

impl SearchClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            media: config.media.clone(),
        }
    }

    /// Build the request URL for a term.
    ///
    /// The term is percent-encoded so that spaces, `&`, `#`, `+` and
    /// non-ASCII text survive as a single query value. An empty term
    /// still yields a request (`term=&media=...`). A query already on the
    /// endpoint (e.g. `?country=us`) is kept ahead of the search parameters.
    pub fn request_url(&self, term: &str) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.endpoint).map_err(|source| SearchError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        if url.cannot_be_a_base() {
            return Err(SearchError::UnsupportedEndpoint {
                endpoint: self.endpoint.clone(),
            });
        }

        let search = format!(
            "term={}&media={}",
            urlencoding::encode(term),
            urlencoding::encode(&self.media)
        );
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, search),
            _ => search,
        };
        url.set_query(Some(&query));
        Ok(url)
    }

    /// Run one search: a single GET, then decode.
    ///
    /// `Err` means the request URL could not be built and nothing was sent;
    /// callers keep whatever results they already show.
    pub async fn search(&self, term: &str) -> Result<SearchOutcome, SearchError> {
        let url = self.request_url(term).inspect_err(|e| {
            tracing::warn!("Search for {:?} aborted: {}", term, e);
        })?;
        Ok(self.search_url(url).await)
    }

    /// Fetch and decode an already-built request URL
    pub async fn search_url(&self, url: Url) -> SearchOutcome {
        tracing::info!("Searching {}", url);

        let outcome = match self.fetch(url).await {
            Ok(body) => match decode_results(&body) {
                Ok(records) => SearchOutcome::from_records(records),
                Err(e) => SearchOutcome::DecodeFailure(e.to_string()),
            },
            Err(FetchFailure::Network(e)) => SearchOutcome::NetworkFailure(e.to_string()),
            Err(FetchFailure::Status(code)) => SearchOutcome::HttpStatus(code),
        };

        if outcome.is_failure() {
            tracing::warn!("Search failed: {}", outcome.summary());
        } else {
            tracing::debug!("Search finished: {}", outcome.summary());
        }

        outcome
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchFailure::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchFailure::Network)?;
        Ok(body.to_vec())
    }

    /// Download artwork bytes for display
    pub async fn fetch_artwork(&self, url: Url) -> Result<Vec<u8>, String> {
        self.fetch(url).await.map_err(|e| match e {
            FetchFailure::Network(e) => e.to_string(),
            FetchFailure::Status(code) => format!("HTTP {}", code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_for(endpoint: &str) -> SearchClient {
        let config = Config {
            endpoint: endpoint.to_string(),
            ..Config::default()
        };
        let client = Client::builder().no_proxy().build().unwrap();
        SearchClient::with_client(&config, client)
    }

    /// Serve one canned HTTP response; the handle yields the request line.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}/search", addr), handle)
    }

    #[test]
    fn test_request_url_escapes_term() {
        let client = client_for("https://itunes.apple.com/search");

        for term in ["jack johnson", "rock & roll", "c#", "1+1", "Björk", "東京事変", "100%"] {
            let url = client.request_url(term).unwrap();
            assert!(url.as_str().starts_with("https://itunes.apple.com/search?term="));

            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
            assert_eq!(
                pairs,
                vec![
                    ("term".to_string(), term.to_string()),
                    ("media".to_string(), "all".to_string())
                ],
                "term {:?} did not round-trip through {}",
                term,
                url
            );
            assert!(url.fragment().is_none());
        }
    }

    #[test]
    fn test_request_url_encoding() {
        let client = client_for("https://itunes.apple.com/search");
        let url = client.request_url("rock & roll").unwrap();
        assert_eq!(
            url.as_str(),
            "https://itunes.apple.com/search?term=rock%20%26%20roll&media=all"
        );
        let encoded = url.query().unwrap().split('&').next().unwrap();
        assert_eq!(
            urlencoding::decode(encoded.trim_start_matches("term=")).unwrap(),
            "rock & roll"
        );
    }

    #[test]
    fn test_empty_term_targets_base_endpoint() {
        let client = client_for("https://itunes.apple.com/search");
        let url = client.request_url("").unwrap();
        assert_eq!(url.as_str(), "https://itunes.apple.com/search?term=&media=all");
    }

    #[test]
    fn test_invalid_endpoint_aborts() {
        assert!(matches!(
            client_for("not a url").request_url("queen"),
            Err(SearchError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            client_for("mailto:someone@example.com").request_url("queen"),
            Err(SearchError::UnsupportedEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_query_is_kept() {
        let client = client_for("https://itunes.apple.com/search?country=us");
        let url = client.request_url("queen").unwrap();
        assert_eq!(
            url.as_str(),
            "https://itunes.apple.com/search?country=us&term=queen&media=all"
        );
    }

    #[tokio::test]
    async fn test_search_with_invalid_endpoint_is_error() {
        let result = client_for("::").search("queen").await;
        assert!(matches!(result, Err(SearchError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_search_decodes_results() {
        let (endpoint, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"resultCount":1,"results":[{"trackName":"Upside Down","artistName":"Jack Johnson","kind":"song"}]}"#,
        )
        .await;

        let outcome = client_for(&endpoint).search("jack johnson").await.unwrap();
        let request_line = server.await.unwrap();

        assert_eq!(
            request_line,
            "GET /search?term=jack%20johnson&media=all HTTP/1.1"
        );
        match outcome {
            SearchOutcome::Results(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].title, "Upside Down");
                assert_eq!(records[0].artist, "Jack Johnson");
            }
            other => panic!("Expected results, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_term_still_fires() {
        let (endpoint, server) =
            serve_once("200 OK", "application/json", r#"{"resultCount":0,"results":[]}"#).await;

        let outcome = client_for(&endpoint).search("").await.unwrap();
        assert_eq!(outcome, SearchOutcome::NoResults);
        assert_eq!(
            server.await.unwrap(),
            "GET /search?term=&media=all HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_server_error_is_http_status() {
        let (endpoint, server) = serve_once(
            "500 Internal Server Error",
            "text/html",
            "<html><body>Internal Server Error</body></html>",
        )
        .await;

        let outcome = client_for(&endpoint).search("queen").await.unwrap();
        server.await.unwrap();

        assert_eq!(outcome, SearchOutcome::HttpStatus(500));
        assert!(outcome.into_results().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_failure() {
        let (endpoint, server) =
            serve_once("200 OK", "text/html", "<html>maintenance</html>").await;

        let outcome = client_for(&endpoint).search("queen").await.unwrap();
        server.await.unwrap();

        assert!(matches!(outcome, SearchOutcome::DecodeFailure(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcome = client_for(&format!("http://{}/search", addr))
            .search("queen")
            .await
            .unwrap();
        assert!(matches!(outcome, SearchOutcome::NetworkFailure(_)));
    }
}
