mod analysis;
mod credentials;
mod history;
mod selected_file;
