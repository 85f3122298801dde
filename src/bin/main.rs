use std::process::ExitCode;

use red_packet::{
    client::SuiClient,
    config::{Config, Mode, USAGE},
    invoker::{Outcome, invoke},
    request::{MoveCall, RedPacket},
};

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    dotenv::dotenv().ok();
    red_packet::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!(?config, "config");

    let call = MoveCall::from(RedPacket::default());
    if config.mode == Mode::PrintCli {
        println!("{}", call.cli_command());
        return Ok(ExitCode::SUCCESS);
    }

    let client = SuiClient::new(&config.url)?;
    tracing::info!(url = client.url(), "sui client");

    let execute = config.mode == Mode::Execute;
    match invoke(&client, config.secret.as_deref(), call, execute).await? {
        Outcome::SignerUnavailable => Ok(ExitCode::FAILURE),
        Outcome::Prepared(tx) => {
            println!("{}", serde_json::to_string_pretty(&tx)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Executed(response) => {
            println!("{}", response.digest);
            Ok(ExitCode::SUCCESS)
        }
    }
}
