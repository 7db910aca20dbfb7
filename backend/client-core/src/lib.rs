pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod preview;
pub mod scan_client;

#[cfg(test)]
mod tests;

pub const SCAN_SERVER_HOSTNAME: &str = "127.0.0.1";
pub const SCAN_SERVER_PORT: u16 = 5000;
pub const DEFAULT_SCAN_SERVER_BASE_URL: &str =
    const_format::concatcp!("http://", SCAN_SERVER_HOSTNAME, ":", SCAN_SERVER_PORT);
