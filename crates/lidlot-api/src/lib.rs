// lidlot-api: Async Rust client for the lidlot lottery backend

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::LotteryClient;
pub use error::Error;
pub use models::{
    HealthResponse, PlayRequest, PlayResponse, PlayStatus, RedeemRequest, RedeemResponse,
    RedeemStatus,
};
pub use transport::{TlsMode, TransportConfig};
