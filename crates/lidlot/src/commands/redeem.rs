//! `lidlot redeem`: the redemption form, one token per run.

use lidlot_core::{LotteryClient, RedeemOutcome, RedeemStatus, RedemptionController, messages};

use crate::cli::RedeemArgs;
use crate::error::CliError;
use crate::output::Printer;
use crate::view::ConsoleRedeemView;

pub async fn handle(
    client: LotteryClient,
    args: RedeemArgs,
    printer: Printer,
) -> Result<(), CliError> {
    let url = client.base_url().to_string();
    let mut controller = RedemptionController::new(ConsoleRedeemView::default(), client);

    match controller.redeem(&args.token).await {
        RedeemOutcome::Empty => Err(CliError::rejected(messages::REDEEM_EMPTY, None)),
        RedeemOutcome::NetworkError(err) => Err(CliError::from_api(err, &url)),
        RedeemOutcome::Answered(response) => {
            printer.print_json(&response)?;
            let view = controller.view();
            if response.status != RedeemStatus::Ok {
                return Err(CliError::rejected(&view.message, response.message.as_deref()));
            }
            if printer.text() {
                printer.print(&printer.headline(&view.message, view.tone));
            }
            Ok(())
        }
    }
}
