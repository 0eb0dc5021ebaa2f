//! Interactive commands read from stdin.
//!
//! One command per line. A line holding only a symbol is shorthand for `add`.

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate and append a symbol.
    Add(String),
    /// Remove a symbol.
    Remove(String),
    /// Show the current list.
    List,
    /// Request a report for the current list.
    Generate,
    /// Show usage.
    Help,
    /// Leave the session.
    Quit,
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  add <TICKER>     add a ticker (or just type the ticker)
  remove <TICKER>  remove a ticker
  list             show the current tickers
  generate         generate a report for the current tickers
  help             show this help
  quit             leave";

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" | "a" => Command::Add(rest.to_string()),
            "remove" | "rm" | "r" => Command::Remove(rest.to_string()),
            "list" | "ls" => Command::List,
            "generate" | "report" | "g" => Command::Generate,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Add(line.to_string()),
        };
        Some(command)
    }
}
