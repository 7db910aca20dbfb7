mod config;
mod in_flight;
mod preview;
mod view;
