use std::path::PathBuf;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Extract,
    Copy,
    CopyFull,
    Clear,
    Preview,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "load" | "open" => {
                if rest.is_empty() {
                    return Err("Usage: load <path>".to_string());
                }
                Command::Load(PathBuf::from(unquote(rest)))
            }
            "extract" | "x" => Command::Extract,
            "copy" | "c" => Command::Copy,
            "copy-full" | "copyfull" => Command::CopyFull,
            "clear" => Command::Clear,
            "preview" | "show" => Command::Preview,
            "status" => Command::Status,
            ":help" | ":h" | ":?" | "help" => Command::Help,
            ":quit" | ":q" | ":exit" | "quit" | "exit" => Command::Quit,
            other => return Err(format!("Unknown command: {other}")),
        };

        if !rest.is_empty() && !matches!(command, Command::Load(_)) {
            return Err(format!("`{word}` takes no arguments"));
        }
        Ok(command)
    }
}

/// Strip one pair of matching surrounding quotes, as pasted paths often have.
fn unquote(path: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = path
            .strip_prefix(quote)
            .and_then(|p| p.strip_suffix(quote))
        {
            return inner;
        }
    }
    path
}

pub const HELP: &str = "\
Commands:
  load <path>   Load a .csv, .xlsx or .xls file and preview it
  extract       Map the required columns to the import layout
  copy          Copy extracted data (or the loaded file) as TSV
  copy-full     Copy the loaded file as TSV, ignoring extraction
  clear         Forget all loaded data
  preview       Show the current preview again
  status        Show the current status line
  :help         Show this help
  :quit         Exit";
