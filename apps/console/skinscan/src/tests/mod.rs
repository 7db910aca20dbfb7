mod cli;
mod command;
mod console_page;
mod error;
mod logger;
