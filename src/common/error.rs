#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected argument '{0}'")]
    Usage(String),
    #[error("invalid address")]
    InvalidAddress,
    #[error("missing secret: set {0}")]
    MissingSecret(&'static str),
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
