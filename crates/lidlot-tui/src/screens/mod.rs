//! Screen implementations. Each screen is a top-level Component.

pub mod lottery;
pub mod redeem;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Lottery, Box::new(lottery::LotteryScreen::new())),
        (ScreenId::Redeem, Box::new(redeem::RedeemScreen::new())),
    ]
}
