// Dashboard line commands.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;

use crate::models::Feature;
use crate::session::SettingKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Home,
    Open(Feature),
    Settings,
    Toggle(SettingKey),
    /// Message, URL, phone context or notes for the open module
    Text(String),
    Phone(String),
    Image(PathBuf),
    /// `data:<mime>;base64,...` pasted straight into the prompt
    ImageData(String),
    Verify,
    Report,
    Clear,
    History,
    Points,
    Logout,
    Quit,
}

pub const HELP: &str = "\
Navigation
  home                     back to the dashboard overview
  open <module>            sms, link, phone, screenshot or payment
  settings                 show settings
  toggle <setting>         notifications, comfort, autoscan or encryption
  logout                   sign out (points and history are kept)
  quit                     leave Suraksha

Module
  text <value>             message, URL, fraud description or notes
  phone <number>           sender phone number (phone module)
  image <path|data-url>    screenshot to analyze (screenshot and payment modules)
  verify                   initiate verification
  report                   report a Scam verdict (+10 points)
  clear                    clear inputs and result

Activity
  history                  last 10 scans
  points                   reward points and reports";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "home" | "back" => Command::Home,
            "open" => {
                if rest.is_empty() {
                    anyhow::bail!("Usage: open <sms|link|phone|screenshot|payment>");
                }
                Command::Open(rest.parse()?)
            }
            "settings" => Command::Settings,
            "toggle" => {
                if rest.is_empty() {
                    anyhow::bail!("Usage: toggle <notifications|comfort|autoscan|encryption>");
                }
                Command::Toggle(rest.parse()?)
            }
            "text" | "msg" | "url" | "context" | "notes" => Command::Text(rest.to_string()),
            "phone" => Command::Phone(rest.to_string()),
            "image" => {
                if rest.is_empty() {
                    anyhow::bail!("Usage: image <path|data-url>");
                }
                if rest.starts_with("data:") {
                    Command::ImageData(rest.to_string())
                } else {
                    Command::Image(PathBuf::from(rest))
                }
            }
            "verify" | "scan" => Command::Verify,
            "report" => Command::Report,
            "clear" | "reset" => Command::Clear,
            "history" => Command::History,
            "points" | "rewards" => Command::Points,
            "logout" => Command::Logout,
            "quit" | "exit" => Command::Quit,
            other => anyhow::bail!("Unknown command '{other}'. Type `help` for the list."),
        };
        Ok(command)
    }
}
