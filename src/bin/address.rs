use red_packet::{
    client::{SuiClient, TESTNET_URL},
    config::URL_VAR,
    request::COIN_TYPE,
    signer::{SECRET_VAR, Signer},
};

// cargo run --bin address

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    red_packet::init_tracing();

    let secret = std::env::var(SECRET_VAR).unwrap_or_default();
    let signer = Signer::from_secret(&secret)?;
    println!("{}", signer.address());

    let url = std::env::var(URL_VAR).unwrap_or_else(|_| TESTNET_URL.to_string());
    let client = SuiClient::new(&url)?;
    let balance = client.balance(&signer.address(), COIN_TYPE).await?;
    println!("{balance} MIST");

    Ok(())
}
