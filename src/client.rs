use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::{
    common::address::{ObjectId, SuiAddress},
    request::MoveCallRequest,
};

pub const TESTNET_URL: &str = "https://sui-testnet-endpoint.blockvision.org";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_or_string")]
    pub version: u64,
    pub digest: String,
}

/// Nodes encode big integers either as JSON numbers or decimal strings.
fn u64_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        String(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::String(s) => s.parse().map_err(D::Error::custom),
    }
}

/// Unsigned transaction produced by `unsafe_moveCall`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    pub tx_bytes: String,
    #[serde(default)]
    pub gas: Vec<ObjectRef>,
    #[serde(default)]
    pub input_objects: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
}

/// The two node calls the invoker needs.
#[allow(async_fn_in_trait)]
pub trait MoveCallClient {
    async fn move_call(&self, request: &MoveCallRequest) -> eyre::Result<TransactionBytes>;

    async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signatures: &[String],
    ) -> eyre::Result<TransactionBlockResponse>;
}

#[derive(Clone)]
pub struct SuiClient {
    http: reqwest::Client,
    url: String,
}

impl SuiClient {
    pub fn new(url: &str) -> eyre::Result<Self> {
        let http = reqwest::ClientBuilder::new().build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn balance(&self, owner: &SuiAddress, coin_type: &str) -> eyre::Result<u128> {
        let value = self
            .rpc(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "suix_getBalance",
                "params": [owner, coin_type],
                "id": 0
            }))
            .await?;
        let total = value["totalBalance"]
            .as_str()
            .ok_or_else(|| eyre::eyre!("totalBalance missing"))?
            .parse::<u128>()?;
        Ok(total)
    }

    async fn rpc(&self, value: serde_json::Value) -> eyre::Result<serde_json::Value> {
        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(json = serde_json::to_string_pretty(&value)?, "HTTP request");
        }
        let res = self.http.post(&self.url).json(&value).send().await?;

        let status = res.status();
        if !status.is_success() {
            let (code, reason) = (status.as_u16(), status.canonical_reason().unwrap_or_default());
            tracing::error!(code, reason, "Sui call failed");
            eyre::bail!("HTTP status {code}");
        }

        let response: serde_json::Value = res.json().await?;
        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(json = serde_json::to_string_pretty(&response)?, "HTTP response");
        }

        result(response)
    }
}

impl MoveCallClient for SuiClient {
    async fn move_call(&self, request: &MoveCallRequest) -> eyre::Result<TransactionBytes> {
        let value = self
            .rpc(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "unsafe_moveCall",
                "params": request.params(),
                "id": 0
            }))
            .await?;
        let tx = serde_json::from_value(value)?;
        Ok(tx)
    }

    async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signatures: &[String],
    ) -> eyre::Result<TransactionBlockResponse> {
        let value = self
            .rpc(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "sui_executeTransactionBlock",
                "params": [
                    tx_bytes,
                    signatures,
                    {
                        "showEffects": true,
                    },
                    "WaitForLocalExecution"
                ],
                "id": 0
            }))
            .await?;
        let response = serde_json::from_value(value)?;
        Ok(response)
    }
}

/// Unwraps a JSON-RPC envelope into its `result`.
fn result(mut response: serde_json::Value) -> eyre::Result<serde_json::Value> {
    if let Some(error) = response["error"].as_object() {
        let json = serde_json::to_string(&error)?;
        eyre::bail!("RPC error: '{json}'");
    }
    if let Some(error) = response["error"].as_str() {
        eyre::bail!("RPC error: '{error}'");
    }
    match response.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => eyre::bail!("RPC response without result"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::common::address::addr;

    #[test]
    fn test_result() {
        let value = result(json!({"jsonrpc": "2.0", "id": 0, "result": "1000"})).unwrap();
        assert_eq!(value, json!("1000"));
    }

    #[test]
    fn test_result_error() {
        let err = result(json!({
            "jsonrpc": "2.0",
            "id": 0,
            "error": {"code": -32602, "message": "Invalid params"}
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("RPC error: '"), "{err}");
        assert!(err.to_string().contains("Invalid params"), "{err}");

        let err = result(json!({"error": "boom"})).unwrap_err();
        assert_eq!(err.to_string(), "RPC error: 'boom'");

        assert!(result(json!({"jsonrpc": "2.0", "id": 0})).is_err());
    }

    #[test]
    fn test_transaction_bytes() {
        let tx: TransactionBytes = serde_json::from_value(json!({
            "txBytes": "AQID",
            "gas": [{
                "objectId": "0x9f71893318fcec03377618948c39dd4e041aefdecadaf44220b1fac61c5addd2",
                "version": "42",
                "digest": "5YbCx1g5nHbzEHKQ9zoqkmVTDEXrzEPhkXnjeqiwZcPG"
            }],
            "inputObjects": []
        }))
        .unwrap();
        assert_eq!(tx.tx_bytes, "AQID");
        assert_eq!(
            tx.gas,
            vec![ObjectRef {
                object_id: addr("0x9f71893318fcec03377618948c39dd4e041aefdecadaf44220b1fac61c5addd2"),
                version: 42,
                digest: "5YbCx1g5nHbzEHKQ9zoqkmVTDEXrzEPhkXnjeqiwZcPG".to_string(),
            }]
        );
    }

    #[test]
    fn test_block_response() {
        let response: TransactionBlockResponse = serde_json::from_value(json!({
            "digest": "3Fv3e1vY9yCVjPN6dBKtbAeA4y4dKPyL8Y2CGcg2d8Ye",
            "effects": {
                "status": {"status": "failure", "error": "InsufficientGas"},
                "gasUsed": {}
            }
        }))
        .unwrap();
        let status = response.effects.unwrap().status;
        assert!(!status.is_success());
        assert_eq!(status.error.as_deref(), Some("InsufficientGas"));
    }
}
