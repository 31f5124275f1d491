//! Parsing of console input lines

use crate::domain::api_key::ApiKeyId;

/// A key as the user refers to it: by table row or by full id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRef {
    /// 1-based row in the last listing
    Row(usize),
    Id(ApiKeyId),
}

impl KeyRef {
    /// Resolve against the current table
    ///
    /// Full ids pass through unchecked so the registry reports unknown keys.
    pub fn resolve(&self, ids: &[ApiKeyId]) -> Option<ApiKeyId> {
        match self {
            Self::Row(row) => row.checked_sub(1).and_then(|i| ids.get(i)).copied(),
            Self::Id(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for KeyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row(row) => write!(f, "row {}", row),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

/// One console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List { json: bool },
    Create { name: String },
    Rename { key: KeyRef, name: String },
    Reveal { key: KeyRef },
    Copy { key: KeyRef },
    Delete { key: KeyRef },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list [--json]           show all keys
  create <name>           create a new key
  rename <key> [name]     change a key's name
  reveal <key>            show or hide a key's full secret
  copy <key>              copy a key's full secret to the clipboard
  delete <key>            delete a key (asks for confirmation)
  help                    show this help
  quit                    end the session

<key> is a row number from `list` or a full key id.";

/// Parse one input line
///
/// Names keep their inner spacing. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => match rest {
            "" => SessionCommand::List { json: false },
            "--json" => SessionCommand::List { json: true },
            other => return Err(format!("unexpected argument '{}'", other)),
        },
        "create" | "new" => SessionCommand::Create {
            name: rest.to_string(),
        },
        "rename" | "edit" => {
            let (key, name) = match rest.split_once(char::is_whitespace) {
                Some((key, name)) => (key, name.trim()),
                None => (rest, ""),
            };
            SessionCommand::Rename {
                key: parse_key_ref(key)?,
                name: name.to_string(),
            }
        }
        "reveal" | "toggle" => SessionCommand::Reveal {
            key: parse_key_ref(rest)?,
        },
        "copy" => SessionCommand::Copy {
            key: parse_key_ref(rest)?,
        },
        "delete" | "rm" => SessionCommand::Delete {
            key: parse_key_ref(rest)?,
        },
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(command))
}

fn parse_key_ref(input: &str) -> Result<KeyRef, String> {
    if input.is_empty() {
        return Err("missing key: give a row number or key id".to_string());
    }

    if let Ok(row) = input.parse::<usize>() {
        return Ok(KeyRef::Row(row));
    }

    input
        .parse::<ApiKeyId>()
        .map(KeyRef::Id)
        .map_err(|_| format!("'{}' is neither a row number nor a key id", input))
}
