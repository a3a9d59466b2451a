//! Client for the Kakao Local keyword search API.

pub mod client;
pub mod error;
pub mod types;

pub use client::KakaoClient;
pub use error::KakaoError;
pub use types::KakaoPlace;
