//! JSON-RPC wire types for the structured remote endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id; responses are not multiplexed so a constant suffices.
pub const REQUEST_ID: u32 = 42;

/// Parameters of a batch integer draw, independent of the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerBatch {
    /// Number of integers.
    pub count: usize,
    /// Smallest allowed value.
    pub minimum: i64,
    /// Largest allowed value.
    pub maximum: i64,
    /// Whether values may repeat.
    pub replacement: bool,
}

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<P> {
    /// Protocol version.
    pub jsonrpc: &'static str,
    /// Remote method name.
    pub method: &'static str,
    /// Method parameters.
    pub params: P,
    /// Request id.
    pub id: u32,
}

impl<P: Serialize> RpcRequest<P> {
    /// Create a request for `method`.
    pub const fn new(method: &'static str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: REQUEST_ID,
        }
    }
}

/// Parameters of `getUsage`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageParams<'a> {
    /// API credential.
    pub api_key: &'a str,
}

/// Parameters of `generateIntegers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegerParams<'a> {
    /// API credential.
    pub api_key: &'a str,
    /// Number of integers.
    pub n: usize,
    /// Smallest allowed value.
    pub min: i64,
    /// Largest allowed value.
    pub max: i64,
    /// `false` asks for pairwise-distinct values.
    pub replacement: bool,
}

impl<'a> IntegerParams<'a> {
    /// Build wire parameters from a batch description.
    #[must_use]
    pub const fn from_batch(api_key: &'a str, batch: &IntegerBatch) -> Self {
        Self {
            api_key,
            n: batch.count,
            min: batch.minimum,
            max: batch.maximum,
            replacement: batch.replacement,
        }
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<R> {
    /// Successful result.
    #[serde(default = "Option::default")]
    pub result: Option<R>,
    /// Error object.
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl<R> RpcResponse<R> {
    /// Unwrap the result, mapping error objects and empty envelopes to `Malformed`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Malformed` if the response has no result.
    pub fn into_result(self) -> ProviderResult<R> {
        if let Some(error) = self.error {
            return Err(ProviderError::Malformed(format!(
                "provider error {}: {}",
                error.code, error.message
            )));
        }
        self.result
            .ok_or_else(|| ProviderError::Malformed("response has no result".to_string()))
    }
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    /// Provider error code.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Result of `getUsage`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResult {
    /// Remaining random bits.
    pub bits_left: i64,
}

/// Result of `generateIntegers`.
#[derive(Debug, Deserialize)]
pub struct IntegersResult {
    /// Random payload.
    pub random: RandomData,
}

/// Random payload of a `generateIntegers` result.
#[derive(Debug, Deserialize)]
pub struct RandomData {
    /// Drawn integers.
    pub data: Vec<i64>,
}
