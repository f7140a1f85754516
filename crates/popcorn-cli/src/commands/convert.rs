use super::progress::Spinner;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{convert, ConversionRequest};
use popcorn_sources::FrankfurterClient;

pub async fn run_convert(amount: f64, from: String, to: String, output: &Output) -> Result<()> {
    let config = super::load_config()?;

    let request = match ConversionRequest::new(amount, &from, &to) {
        Ok(request) => request,
        Err(e) => {
            output.warn(e.to_string());
            return Ok(());
        }
    };

    let client = FrankfurterClient::from_config(&config.exchange)
        .map_err(|e| eyre!("Failed to create exchange client: {}", e))?;

    let spinner = Spinner::start("Calculating...", output);
    let result = convert(&client, &request).await;
    spinner.finish();

    output.conversion(&result?);

    Ok(())
}
