use eyre::Context;

use crate::{
    client::{MoveCallClient, TransactionBlockResponse, TransactionBytes},
    request::MoveCall,
    signer::Signer,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// No signer could be derived; nothing was sent.
    SignerUnavailable,
    Prepared(TransactionBytes),
    Executed(TransactionBlockResponse),
}

/// Derives the signer, submits `call` on its behalf and, when `execute` is
/// set, signs and executes the transaction the node returned.
pub async fn invoke<C: MoveCallClient>(
    client: &C,
    secret: Option<&str>,
    call: MoveCall,
    execute: bool,
) -> eyre::Result<Outcome> {
    let signer = match Signer::from_secret(secret.unwrap_or_default()) {
        Ok(signer) => signer,
        Err(error) => {
            tracing::error!(%error, "failed to create signer");
            return Ok(Outcome::SignerUnavailable);
        }
    };

    let request = call.with_signer(signer.address());
    tracing::info!(
        signer = %request.signer,
        package = %request.package_object_id,
        module = %request.module,
        function = %request.function,
        gas_budget = %request.gas_budget,
        "move call"
    );
    let tx = client
        .move_call(&request)
        .await
        .context("unsafe_moveCall")?;
    let gas = tx
        .gas
        .iter()
        .map(|gas| gas.object_id.to_string())
        .collect::<Vec<_>>();
    tracing::info!(bytes = tx.tx_bytes.len(), ?gas, "transaction prepared");

    if !execute {
        return Ok(Outcome::Prepared(tx));
    }

    let signature = signer.sign_transaction(&tx.tx_bytes)?;
    let response = client
        .execute_transaction_block(&tx.tx_bytes, &[signature])
        .await
        .context("sui_executeTransactionBlock")?;

    match response.effects.as_ref().map(|effects| &effects.status) {
        Some(status) if !status.is_success() => {
            let error = status.error.as_deref().unwrap_or(&status.status);
            tracing::error!(digest = %response.digest, error, "transaction failed");
            eyre::bail!("transaction {} failed: {error}", response.digest);
        }
        Some(_) => tracing::info!(digest = %response.digest, "transaction executed"),
        None => tracing::warn!(digest = %response.digest, "transaction submitted without effects"),
    }
    Ok(Outcome::Executed(response))
}
