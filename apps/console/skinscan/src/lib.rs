// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod command;
pub mod console_page;
pub mod error;
pub mod logger;
pub mod session;

#[cfg(test)]
mod tests;
