//! Session commands parsed from one input line.

use crate::error::ConsoleError;

use models::{Credentials, SignupForm};

use std::path::PathBuf;
use std::str::FromStr;

pub const HELP_TEXT: &str = "\
Commands:
  login <username> <password> [field=value...]   submit the login form
  signup <username> <password> <age>             create an account
  logout                                         end the session
  open <path>                                    load a page (/, /app, /history)
  select <file>...                               choose image files for analysis
  analyze                                        upload the selected image
  history                                        reload the history list
  delete <id>                                    delete a history record
  page                                           show the current page
  help                                           show this text
  quit                                           leave the session";

#[derive(Debug)]
pub enum Command {
    Login(Credentials),
    Signup(SignupForm),
    Logout,
    Open(String),
    Select(Vec<PathBuf>),
    Analyze,
    History,
    Delete(i64),
    Page,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ConsoleError::input("Empty command"));
        };
        let args: Vec<&str> = words.collect();

        match name.to_ascii_lowercase().as_str() {
            "login" => parse_login(&args),
            "signup" => match args.as_slice() {
                [username, password, age] => {
                    Ok(Command::Signup(SignupForm::new(*username, *password, age)?))
                }
                _ => Err(ConsoleError::input(
                    "Usage: signup <username> <password> <age>",
                )),
            },
            "logout" => no_args(&args, Command::Logout),
            "open" => match args.as_slice() {
                [path] => Ok(Command::Open((*path).to_string())),
                _ => Err(ConsoleError::input("Usage: open <path>")),
            },
            "select" => Ok(Command::Select(args.iter().map(PathBuf::from).collect())),
            "analyze" => no_args(&args, Command::Analyze),
            "history" => no_args(&args, Command::History),
            "delete" => match args.as_slice() {
                [id] => id
                    .parse()
                    .map(Command::Delete)
                    .map_err(|_| ConsoleError::input(format!("Invalid record id: {id}"))),
                _ => Err(ConsoleError::input("Usage: delete <id>")),
            },
            "page" => no_args(&args, Command::Page),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ConsoleError::input(format!(
                "Unknown command: {other} (try 'help')"
            ))),
        }
    }
}

fn no_args(args: &[&str], command: Command) -> Result<Command, ConsoleError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ConsoleError::input(format!(
            "Unexpected arguments: {}",
            args.join(" ")
        )))
    }
}

fn parse_login(args: &[&str]) -> Result<Command, ConsoleError> {
    let [username, password, extra @ ..] = args else {
        return Err(ConsoleError::input(
            "Usage: login <username> <password> [field=value...]",
        ));
    };

    let mut builder = Credentials::builder()
        .with_username(*username)
        .with_password(*password);

    for pair in extra {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ConsoleError::input(format!(
                "Expected field=value, got: {pair}"
            )));
        };
        builder = builder.with_field(key, value);
    }

    Ok(Command::Login(builder.build()?))
}
