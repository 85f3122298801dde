use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::address::{ObjectId, SuiAddress, addr};

pub const PACKAGE: ObjectId =
    addr("0x7a638a2a2f7118c1d3b209fe14902a61c2b8eeb9f288681efc2f42a1a0308ec5");
pub const MODULE: &str = "distributor";
pub const FUNCTION: &str = "create_red_packet";
pub const COIN_TYPE: &str = "0x2::sui::SUI";
pub const GAS_BUDGET: u64 = 100_000_000;

/// A move call argument as accepted by `sui client call --args`: JSON when
/// the literal parses as JSON, a plain string otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallArg(pub Value);

impl CallArg {
    pub fn parse(literal: &str) -> Self {
        match serde_json::from_str::<Value>(literal) {
            Ok(value) => Self(value),
            Err(_) => Self(Value::String(literal.to_string())),
        }
    }

    pub fn address(address: SuiAddress) -> Self {
        Self(Value::String(address.to_string()))
    }

    pub fn bytes(s: &str) -> Self {
        Self(bytes_value(s))
    }

    pub fn byte_strings(items: &[&str]) -> Self {
        Self(Value::Array(items.iter().map(|s| bytes_value(s)).collect()))
    }

    pub fn u64s(items: &[u64]) -> Self {
        Self(Value::Array(items.iter().map(|n| Value::from(*n)).collect()))
    }
}

fn bytes_value(s: &str) -> Value {
    Value::Array(s.bytes().map(Value::from).collect())
}

impl std::fmt::Display for CallArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Target, type arguments, arguments and budget of a move call; everything
/// but the sender.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
    pub gas_budget: u64,
}

impl MoveCall {
    pub fn with_signer(self, signer: SuiAddress) -> MoveCallRequest {
        MoveCallRequest {
            signer,
            package_object_id: self.package,
            module: self.module,
            function: self.function,
            type_arguments: self.type_arguments,
            arguments: self.arguments,
            gas: None,
            gas_budget: self.gas_budget.to_string(),
        }
    }

    /// The same call as a `sui client call` command line.
    pub fn cli_command(&self) -> String {
        let mut lines = vec![
            "sui client call".to_string(),
            format!("--package {}", self.package),
            format!("--module {}", self.module),
            format!("--function {}", self.function),
        ];
        if !self.type_arguments.is_empty() {
            let types = self
                .type_arguments
                .iter()
                .map(|t| format!("{t:?}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("--type-args {types}"));
        }
        if !self.arguments.is_empty() {
            lines.push("--args".to_string());
            lines.extend(self.arguments.iter().map(|arg| format!("  {:?}", arg.to_string())));
        }
        lines.push(format!("--gas-budget {} --json", self.gas_budget));
        lines.join(" \\\n")
    }
}

/// Parameters of `distributor::create_red_packet`.
#[derive(Clone, Debug, PartialEq)]
pub struct RedPacket {
    pub coin: ObjectId,
    pub name: String,
    pub claimers: Vec<String>,
    pub amounts: Vec<u64>,
    pub owner: SuiAddress,
}

impl Default for RedPacket {
    fn default() -> Self {
        Self {
            coin: addr("0x9f71893318fcec03377618948c39dd4e041aefdecadaf44220b1fac61c5addd2"),
            name: "redpacket001".to_string(),
            claimers: vec!["hawkli-1994".to_string()],
            amounts: vec![100_000_000],
            owner: addr("0x5d0ed262b481eb71dc1347f61194cf963b3e8327f02946b458dbec8046bde91b"),
        }
    }
}

impl From<RedPacket> for MoveCall {
    fn from(packet: RedPacket) -> Self {
        let claimers = packet.claimers.iter().map(String::as_str).collect::<Vec<_>>();
        Self {
            package: PACKAGE,
            module: MODULE.to_string(),
            function: FUNCTION.to_string(),
            type_arguments: vec![COIN_TYPE.to_string()],
            arguments: vec![
                CallArg::address(packet.coin),
                CallArg::bytes(&packet.name),
                CallArg::byte_strings(&claimers),
                CallArg::u64s(&packet.amounts),
                CallArg::address(packet.owner),
            ],
            gas_budget: GAS_BUDGET,
        }
    }
}

/// Body of `unsafe_moveCall`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCallRequest {
    pub signer: SuiAddress,
    pub package_object_id: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
    pub gas: Option<ObjectId>,
    pub gas_budget: String,
}

impl MoveCallRequest {
    /// Positional JSON-RPC params in the order the node expects them.
    pub fn params(&self) -> Value {
        serde_json::json!([
            self.signer,
            self.package_object_id,
            self.module,
            self.function,
            self.type_arguments,
            self.arguments,
            self.gas,
            self.gas_budget,
        ])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_call_arg_parse() {
        assert_eq!(CallArg::parse("[1,2]"), CallArg(serde_json::json!([1, 2])));
        assert_eq!(CallArg::parse("0x2"), CallArg(Value::String("0x2".into())));
        assert_eq!(CallArg::parse("[[1]]").to_string(), "[[1]]");
        assert_eq!(CallArg::bytes("ab"), CallArg::parse("[97,98]"));
    }

    #[test]
    fn test_params_order() {
        let signer = addr("0x1");
        let request = MoveCall::from(RedPacket::default()).with_signer(signer);
        let params = request.params();
        let params = params.as_array().unwrap();
        assert_eq!(params.len(), 8);
        assert_eq!(params[0], serde_json::json!(signer.to_string()));
        assert_eq!(
            params[1],
            serde_json::json!("0x7a638a2a2f7118c1d3b209fe14902a61c2b8eeb9f288681efc2f42a1a0308ec5")
        );
        assert_eq!(params[2], serde_json::json!("distributor"));
        assert_eq!(params[3], serde_json::json!("create_red_packet"));
        assert_eq!(params[4], serde_json::json!(["0x2::sui::SUI"]));
        assert_eq!(params[5].as_array().unwrap().len(), 5);
        assert_eq!(params[6], Value::Null);
        assert_eq!(params[7], serde_json::json!("100000000"));
    }

    #[test]
    fn test_cli_command() {
        let call = MoveCall::from(RedPacket::default());
        let expected = r#"sui client call \
--package 0x7a638a2a2f7118c1d3b209fe14902a61c2b8eeb9f288681efc2f42a1a0308ec5 \
--module distributor \
--function create_red_packet \
--type-args "0x2::sui::SUI" \
--args \
  "0x9f71893318fcec03377618948c39dd4e041aefdecadaf44220b1fac61c5addd2" \
  "[114,101,100,112,97,99,107,101,116,48,48,49]" \
  "[[104,97,119,107,108,105,45,49,57,57,52]]" \
  "[100000000]" \
  "0x5d0ed262b481eb71dc1347f61194cf963b3e8327f02946b458dbec8046bde91b" \
--gas-budget 100000000 --json"#;
        assert_eq!(call.cli_command(), expected);
    }
}
