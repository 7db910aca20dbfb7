mod analysis;
mod auth;
mod bind;
mod helpers;
mod history;
mod scan_client;
