//! random.org HTTP backend.
//!
//! Three endpoints are used:
//! - `quota_url?format=plain`: remaining bits for the caller IP, as plain text
//! - `bytes_url?nbytes={n}&format=h`: `n` random bytes, hex encoded
//! - `api_url`: JSON-RPC (`getUsage`, `generateIntegers`), credential required

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ProviderConfig;
use crate::domain::rpc::{
    IntegerParams, IntegersResult, RpcRequest, RpcResponse, UsageParams, UsageResult,
};
use crate::domain::{IntegerBatch, QuotaState};
use crate::error::{ProviderError, ProviderResult};
use crate::provider::traits::RandomProvider;

/// Blocking HTTP client for random.org.
pub struct RandomOrgProvider {
    client: Client,
    quota_url: String,
    bytes_url: String,
    api_url: String,
}

impl RandomOrgProvider {
    /// Create a new provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("truerand/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            quota_url: config.quota_url.clone(),
            bytes_url: config.bytes_url.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Send a request and require a `200 OK`.
    fn send(request: RequestBuilder, timeout: Duration) -> ProviderResult<Response> {
        let response = request.timeout(timeout).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::Status(status.as_u16()));
        }
        Ok(response)
    }

    /// Invoke a JSON-RPC method and unwrap its result.
    fn call<P, R>(&self, method: &'static str, params: P, timeout: Duration) -> ProviderResult<R>
    where
        P: serde::Serialize,
        R: DeserializeOwned,
    {
        debug!(method, url = %self.api_url, "Invoking JSON-RPC method");
        let request = self
            .client
            .post(&self.api_url)
            .json(&RpcRequest::new(method, params));
        let body: RpcResponse<R> = Self::send(request, timeout)?.json()?;
        body.into_result()
    }
}

impl RandomProvider for RandomOrgProvider {
    fn quota(&self, credential: Option<&str>, timeout: Duration) -> ProviderResult<QuotaState> {
        if let Some(api_key) = credential {
            let usage: UsageResult = self.call("getUsage", UsageParams { api_key }, timeout)?;
            return Ok(QuotaState::from_bits(usage.bits_left));
        }

        let url = with_params(&self.quota_url, &[("format", "plain")])?;
        debug!(%url, "Querying plain quota");
        let text = Self::send(self.client.get(url), timeout)?.text()?;
        let bits = text
            .trim()
            .parse::<i64>()
            .map_err(|e| ProviderError::Malformed(format!("quota {:?}: {e}", text.trim())))?;
        Ok(QuotaState::from_bits(bits))
    }

    fn random_bytes(&self, count: usize, timeout: Duration) -> ProviderResult<Vec<u8>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let nbytes = count.to_string();
        let url = with_params(&self.bytes_url, &[("nbytes", nbytes.as_str()), ("format", "h")])?;
        debug!(count, %url, "Fetching random bytes");
        let bytes = decode_hex(&Self::send(self.client.get(url), timeout)?.text()?)?;

        if bytes.len() != count {
            return Err(ProviderError::Malformed(format!(
                "requested {count} bytes, received {}",
                bytes.len()
            )));
        }
        Ok(bytes)
    }

    fn generate_integers(
        &self,
        credential: &str,
        batch: &IntegerBatch,
        timeout: Duration,
    ) -> ProviderResult<Vec<i64>> {
        let result: IntegersResult = self.call(
            "generateIntegers",
            IntegerParams::from_batch(credential, batch),
            timeout,
        )?;
        Ok(result.random.data)
    }

    fn backend_name(&self) -> &'static str {
        "random_org"
    }
}

/// Append query parameters to a configured endpoint.
fn with_params(base: &str, params: &[(&str, &str)]) -> ProviderResult<Url> {
    Url::parse_with_params(base, params)
        .map_err(|e| ProviderError::Connection(format!("invalid endpoint {base}: {e}")))
}

/// Decode whitespace-separated hex pairs such as `"0a ff\n3c"`.
pub(crate) fn decode_hex(text: &str) -> ProviderResult<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(digits).map_err(|e| ProviderError::Malformed(format!("invalid hex payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00 ff 7a\n10").unwrap(), vec![0, 255, 0x7a, 0x10]);
        assert_eq!(decode_hex("ABcd").unwrap(), vec![0xab, 0xcd]);
        assert_eq!(decode_hex("\n").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
        assert!(decode_hex("<html>").is_err());
        assert!(matches!(
            decode_hex("0g"),
            Err(ProviderError::Malformed(message)) if message.starts_with("invalid hex payload")
        ));
    }

    #[test]
    fn test_zero_bytes_skips_network() {
        let config = ProviderConfig {
            bytes_url: "http://127.0.0.1:9/never".to_string(),
            ..Default::default()
        };
        let provider = RandomOrgProvider::new(&config).unwrap();
        assert!(
            provider
                .random_bytes(0, Duration::from_millis(10))
                .unwrap()
                .is_empty()
        );
        assert_eq!(provider.backend_name(), "random_org");
    }
}
