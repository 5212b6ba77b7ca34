//! HTTP client for the price-tracker backend's `/api/products` endpoints.
//!
//! Wraps `reqwest` with backend-specific error handling and typed response
//! deserialization. A `4xx` response with an `{"error": …}` JSON body is
//! surfaced as [`ClientError::Rejected`] carrying the backend's message;
//! other non-2xx statuses become [`ClientError::UnexpectedStatus`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use pricewatch_core::{AppConfig, Filter, Product};

use crate::error::ClientError;

/// Client for the price-tracker backend REST API.
///
/// Manages the HTTP client and base URL. Construct with [`BackendClient::new`]
/// from a configured base URL, or point it at a mock server in tests.
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

/// Error body shape the backend uses for validation rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl BackendClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the API path instead of replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the tracked-product list for the given filter.
    ///
    /// Calls `GET /api/products` with `search` (always present, possibly
    /// empty) and `min_price` / `max_price` (omitted when the bound is
    /// absent) as query parameters. The response is the authoritative, total
    /// list for that filter.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] / [`ClientError::UnexpectedStatus`] on a
    ///   non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a JSON product array.
    pub async fn list_products(&self, filter: &Filter) -> Result<Vec<Product>, ClientError> {
        let url = self.products_url(filter)?;
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Registers a new product by source URL and returns the created record.
    ///
    /// Calls `POST /api/products` with body `{"url": …}`. The backend scrapes
    /// the page, assigns an id, and enforces URL uniqueness authoritatively.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Rejected`] on a 4xx rejection (malformed URL,
    ///   unsupported site, duplicate), carrying the backend's message when
    ///   the body supplied one.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on
    ///   transport failure or other non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a JSON product.
    pub async fn create_product(&self, product_url: &str) -> Result<Product, ClientError> {
        let url = self.endpoint("api/products")?;
        let response = self
            .client
            .post(url.clone())
            .json(&serde_json::json!({ "url": product_url }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("created product for {product_url}"),
            source: e,
        })
    }

    /// Triggers a backend-side price re-scrape for the given product URL.
    ///
    /// Calls `POST /api/products/recheck` with body `{"url": …}`. The
    /// response carries no data beyond its status; updated prices are
    /// observed through a subsequent [`BackendClient::list_products`] call.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Rejected`] on a 4xx rejection.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on
    ///   transport failure or other non-2xx status.
    pub async fn recheck_product(&self, product_url: &str) -> Result<(), ClientError> {
        let url = self.endpoint("api/products/recheck")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "url": product_url }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Resolves an API path against the stored base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Builds the product-list URL with properly percent-encoded query
    /// parameters for the given filter.
    fn products_url(&self, filter: &Filter) -> Result<Url, ClientError> {
        let mut url = self.endpoint("api/products")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("search", &filter.search);
            if let Some(min) = filter.min_price {
                pairs.append_pair("min_price", &min.to_string());
            }
            if let Some(max) = filter.max_price {
                pairs.append_pair("max_price", &max.to_string());
            }
        }
        Ok(url)
    }

    /// Maps a non-success response to a typed error, extracting the
    /// `{"error": …}` message from 4xx bodies when present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.is_client_error() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .map(|b| b.error);
            tracing::debug!(status = status.as_u16(), ?message, "backend rejected request");
            return Err(ClientError::Rejected { message });
        }

        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> BackendClient {
        BackendClient::new(base_url, 30, "pricewatch-test/0.1")
            .expect("client construction should not fail")
    }

    fn url_for(filter: &Filter) -> String {
        test_client("http://localhost:5000")
            .products_url(filter)
            .expect("products URL should build")
            .to_string()
    }

    #[test]
    fn products_url_sends_empty_search_and_omits_absent_bounds() {
        let url = url_for(&Filter::default());
        assert_eq!(url, "http://localhost:5000/api/products?search=");
    }

    #[test]
    fn products_url_includes_bounds_when_present() {
        let filter = Filter {
            search: "headphones".to_string(),
            min_price: Some(500.0),
            max_price: Some(2000.0),
        };
        let url = url_for(&filter);
        assert_eq!(
            url,
            "http://localhost:5000/api/products?search=headphones&min_price=500&max_price=2000"
        );
    }

    #[test]
    fn products_url_encodes_special_characters() {
        let filter = Filter {
            search: "tea & coffee".to_string(),
            ..Filter::default()
        };
        let url = url_for(&filter);
        assert!(
            url.contains("tea+%26+coffee") || url.contains("tea%20%26%20coffee"),
            "search param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let with_slash = test_client("http://localhost:5000/")
            .endpoint("api/products")
            .expect("endpoint should build");
        let without_slash = test_client("http://localhost:5000")
            .endpoint("api/products")
            .expect("endpoint should build");
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.as_str(), "http://localhost:5000/api/products");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = BackendClient::new("not a url", 30, "pricewatch-test/0.1");
        assert!(matches!(
            result,
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }
}
