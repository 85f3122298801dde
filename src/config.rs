use crate::{client::TESTNET_URL, common::error::Error, signer::SECRET_VAR};

pub const URL_VAR: &str = "SUI_RPC_URL";

pub const USAGE: &str = "Usage: main [--execute | --print-cli]";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Ask the node to build the transaction; do not sign it.
    #[default]
    Prepare,
    /// Build, sign and execute.
    Execute,
    /// Print the equivalent `sui client call` and exit.
    PrintCli,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub secret: Option<String>,
    pub mode: Mode,
}

impl Config {
    /// Reads `SUI_RPC_URL` and `SUI_MNEMONIC` from the environment (call
    /// `dotenv` first) and the mode from the command line.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(
            std::env::var(URL_VAR).ok(),
            std::env::var(SECRET_VAR).ok(),
            std::env::args().skip(1),
        )
    }

    pub fn new<I, S>(url: Option<String>, secret: Option<String>, args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode = Mode::default();
        for arg in args {
            mode = match (mode, arg.as_ref()) {
                (Mode::Prepare, "--execute") => Mode::Execute,
                (Mode::Prepare, "--print-cli") => Mode::PrintCli,
                (_, other) => return Err(Error::Usage(other.to_string())),
            };
        }

        let url = url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| TESTNET_URL.to_string());
        let secret = secret.filter(|secret| !secret.trim().is_empty());
        Ok(Self { url, secret, mode })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("mode", &self.mode)
            .finish()
    }
}
