//! `lidlot health`: ask the server whether it is up.

use lidlot_core::LotteryClient;

use crate::error::CliError;
use crate::output::Printer;

pub async fn handle(client: &LotteryClient, printer: Printer) -> Result<(), CliError> {
    let health = client
        .health()
        .await
        .map_err(|e| CliError::from_api(e, client.base_url().as_str()))?;

    printer.print_json(&health)?;
    if !health.ok {
        return Err(CliError::Unhealthy);
    }
    if printer.text() {
        printer.print(&format!("ok {}", printer.dim(client.base_url().as_str())));
    }
    Ok(())
}
