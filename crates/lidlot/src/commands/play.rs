//! `lidlot play`: the entry flow on a console view.

use tracing::debug;
use url::Url;

use lidlot_core::code::is_well_formed;
use lidlot_core::{
    EntryController, LotteryClient, PlayOutcome, PlayStatus, Tone, UnicodeQrEncoder, messages,
};

use crate::cli::PlayArgs;
use crate::config::Config;
use crate::error::CliError;
use crate::output::{Printer, reels_line};
use crate::view::ConsoleView;

pub async fn handle(
    client: LotteryClient,
    cfg: &Config,
    args: PlayArgs,
    printer: Printer,
) -> Result<(), CliError> {
    let url = client.base_url().to_string();
    let mut controller = EntryController::new(
        ConsoleView::new(printer),
        client,
        UnicodeQrEncoder,
        cfg.entry_config()?,
    );

    match (args.code.as_deref(), args.link.as_deref()) {
        (Some(code), _) => {
            if !is_well_formed(code) {
                return Err(CliError::rejected(
                    messages::INVALID_CODE,
                    Some(&format!("'{code}' is not a 4-digit code")),
                ));
            }
            for digit in code.chars() {
                controller.add_digit(digit);
            }
        }
        (None, Some(link)) => {
            let link = Url::parse(link).map_err(|e| CliError::Validation {
                field: "link".into(),
                reason: e.to_string(),
            })?;
            if !controller.prefill_from_url(&link) {
                debug!(%link, "link carries no accepted code");
            }
        }
        (None, None) => {
            return Err(CliError::Validation {
                field: "code".into(),
                reason: "pass a CODE or --link URL".into(),
            });
        }
    }

    let response = match controller.play().await {
        PlayOutcome::Answered(response) => response,
        PlayOutcome::Rejected => {
            let message = controller
                .view()
                .input_error
                .clone()
                .unwrap_or_else(|| messages::INVALID_CODE.to_owned());
            return Err(CliError::rejected(&message, None));
        }
        PlayOutcome::NetworkError(err) => return Err(CliError::from_api(err, &url)),
    };

    printer.print_json(&response)?;

    let view = controller.view();
    let tone = match response.status {
        PlayStatus::Win => Tone::Success,
        PlayStatus::Lose => Tone::Neutral,
        PlayStatus::Invalid | PlayStatus::Other => {
            return Err(CliError::rejected(&view.message, Some(&view.detail)));
        }
    };

    if printer.text() {
        printer.print(&reels_line(view.reels));
        printer.print(&printer.headline(&view.message, tone));
        printer.print(&view.detail);
    }

    if tone == Tone::Success && printer.text() && !args.no_coupon {
        controller.show_coupon()?;
    }
    Ok(())
}
