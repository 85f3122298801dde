use base64::{Engine as _, engine::general_purpose::STANDARD};
use ed25519_dalek::{Signer as _, SigningKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::common::{
    address::{ED25519_FLAG, SuiAddress},
    error::Error,
    hash::blake2b256,
};

/// Environment variable holding the secret material.
pub const SECRET_VAR: &str = "SUI_MNEMONIC";

/// Hardened SLIP-10 path `m/44'/784'/0'/0'/0'` used by Sui wallets for Ed25519.
const DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];

const HARDENED: u32 = 0x8000_0000;

/// Intent prefix for transaction data: scope, version, app id.
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

type HmacSha512 = Hmac<Sha512>;

pub struct Signer {
    key: SigningKey,
    address: SuiAddress,
}

impl Signer {
    pub fn from_mnemonic(phrase: &str) -> Result<Self, Error> {
        let mnemonic = bip39::Mnemonic::parse(phrase.trim())?;
        let seed = mnemonic.to_seed("");
        let secret = slip10_ed25519(&seed, &DERIVATION_PATH)?;
        Ok(Self::from_bytes(&secret))
    }

    pub fn from_private_key(hex: &str) -> Result<Self, Error> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut secret = [0u8; 32];
        hex::decode_to_slice(hex, &mut secret)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_bytes(&secret))
    }

    /// Hex private key when the value looks like one, mnemonic otherwise.
    pub fn from_secret(secret: &str) -> Result<Self, Error> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(Error::MissingSecret(SECRET_VAR));
        }
        let is_hex = secret.starts_with("0x")
            || (secret.len() == 64 && secret.chars().all(|c| c.is_ascii_hexdigit()));
        if is_hex {
            Self::from_private_key(secret)
        } else {
            Self::from_mnemonic(secret)
        }
    }

    fn from_bytes(secret: &[u8; 32]) -> Self {
        let key = SigningKey::from_bytes(secret);
        let address = SuiAddress::from_ed25519(&key.verifying_key().to_bytes());
        Self { key, address }
    }

    pub fn address(&self) -> SuiAddress {
        self.address
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    /// Signs base64 transaction bytes as returned by the node and yields the
    /// serialized signature: `base64(flag || signature || pubkey)`.
    pub fn sign_transaction(&self, tx_bytes: &str) -> Result<String, Error> {
        let tx = STANDARD
            .decode(tx_bytes)
            .map_err(|e| Error::MalformedResponse(format!("txBytes: {e}")))?;
        let mut message = Vec::with_capacity(TRANSACTION_INTENT.len() + tx.len());
        message.extend_from_slice(&TRANSACTION_INTENT);
        message.extend_from_slice(&tx);
        let digest = blake2b256(&message);

        let signature = self.key.sign(&digest);
        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());
        Ok(STANDARD.encode(serialized))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn slip10_ed25519(seed: &[u8], path: &[u32]) -> Result<[u8; 32], Error> {
    let mut mac = HmacSha512::new_from_slice(b"ed25519 seed").map_err(|_| Error::KeyDerivation)?;
    mac.update(seed);
    let mut node = [0u8; 64];
    node.copy_from_slice(&mac.finalize().into_bytes());

    for index in path {
        let (key, chain_code) = node.split_at(32);
        let mut mac = HmacSha512::new_from_slice(chain_code).map_err(|_| Error::KeyDerivation)?;
        mac.update(&[0u8]);
        mac.update(key);
        mac.update(&(index | HARDENED).to_be_bytes());
        node.copy_from_slice(&mac.finalize().into_bytes());
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&node[..32]);
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::address::addr;

    const MNEMONIC: &str = "film crazy soon outside stand loop subway crumble thrive popular green nuclear struggle pistol arm wife phrase warfare march wheat nephew ask sunny firm";

    #[test]
    fn test_mnemonic_address() {
        let signer = Signer::from_mnemonic(MNEMONIC).unwrap();
        assert_eq!(
            signer.address(),
            addr("0xa2d14fad60c56049ecf75246a481934691214ce413e6a8ae2fe6834c173a6133")
        );
        assert_eq!(
            hex::encode(signer.public_key()),
            "22647feeef363060bd4205a1671a15f10a1236765918b1b5f638d82f33cfc469"
        );
    }

    #[test]
    fn test_slip10_secret() {
        let seed = bip39::Mnemonic::parse(MNEMONIC).unwrap().to_seed("");
        let secret = slip10_ed25519(&seed, &DERIVATION_PATH).unwrap();
        assert_eq!(
            hex::encode(secret),
            "dd09307a43ba6dc186b5709e4ca51f4fc71911c143f7ceffcf8c60e6b03bc8fa"
        );
    }

    #[test]
    fn test_private_key() {
        let hex = "0x5d0ed262b481eb71dc1347f61194cf963b3e8327f02946b458dbec8046bde91b";
        let signer = Signer::from_secret(hex).unwrap();
        assert_eq!(
            signer.address(),
            addr("0x2fb23e9aa01936bf3eb8bba4e0d19566d639b4edf2b77b087fb95be70a78ec11")
        );
        let bare = Signer::from_secret(hex.trim_start_matches("0x")).unwrap();
        assert_eq!(bare.address(), signer.address());
    }

    #[test]
    fn test_invalid_secret() {
        assert!(matches!(
            Signer::from_secret("film crazy soon"),
            Err(Error::InvalidMnemonic(_))
        ));
        assert!(matches!(
            Signer::from_secret("  "),
            Err(Error::MissingSecret(SECRET_VAR))
        ));
        assert!(matches!(
            Signer::from_secret("0x1234"),
            Err(Error::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_sign_transaction() {
        let signer = Signer::from_mnemonic(MNEMONIC).unwrap();
        let tx = STANDARD.encode([1u8, 2, 3]);
        let signature = signer.sign_transaction(&tx).unwrap();
        assert_eq!(
            signature,
            "AEOd8tx1JMFCAnx5mxmnPewq9lW94lv6RY8tGQs2OEXf9pBui/YNN9+J/P6dDl29JM9wRtASI/r3UrctBJ9WEgciZH/u7zYwYL1CBaFnGhXxChI2dlkYsbX2ONgvM8/EaQ=="
        );
        assert!(signer.sign_transaction("not base64!").is_err());
    }
}
