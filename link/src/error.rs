use std::fmt;
use thiserror::Error;

/// The three records every module consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Definitions,
    Uses,
    Text,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Definitions => write!(f, "definition list"),
            Record::Uses => write!(f, "use list"),
            Record::Text => write!(f, "program text"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unexpected end of input: {0} required")]
    UnexpectedEof(&'static str),

    #[error("Cannot parse `{0}` as {1}")]
    ParseArgument(String, &'static str),

    #[error("Unknown address type: `{0}`")]
    UnknownAddrType(String),

    #[error("Word `{0}` does not fit in 4 decimal digits")]
    WordOverflow(String),

    #[error("Symbol `{0}` is longer than {1} characters")]
    SymbolTooLong(String, usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} (in {record} of module {module})")]
    Format {
        file: String,
        line: usize,
        module: usize,
        record: Record,
        kind: FormatError,
    },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read input")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize report")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// File and 1-based line of a format error.
    pub fn location(&self) -> Option<(&str, usize)> {
        match self {
            Error::Format { file, line, .. } => Some((file, *line)),
            _ => None,
        }
    }
}
