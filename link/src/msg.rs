use crate::error::Error;
use crate::reader::Lint;
use color_print::ceprintln;
use indexmap::IndexMap;
use std::error::Error as _;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self, info: Option<(&str, usize, &str)>) {
        match self {
            Msg::Error(msg) => ceprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => ceprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => ceprintln!("<green,bold>note</>: {}", msg),
        }
        if let Some((file, line, raw)) = info {
            ceprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
            ceprintln!("      <blue>|</>");
            ceprintln!(" <blue>{:>4} |</> {}", line, raw);
            ceprintln!("      <blue>|</>");
        }
    }
}

/// Line `line` (1-based) of `file`, or an empty string.
fn source_line<'a>(sources: &'a IndexMap<String, String>, file: &str, line: usize) -> &'a str {
    sources
        .get(file)
        .and_then(|src| src.lines().nth(line.saturating_sub(1)))
        .unwrap_or("")
}

/// Print a fatal error, quoting the offending line when there is one.
pub fn error(err: &Error, sources: &IndexMap<String, String>) {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    let info = err
        .location()
        .map(|(file, line)| (file, line, source_line(sources, file, line)));
    Msg::Error(text).print(info);
    if let Error::Format { .. } = err {
        Msg::Note("Records after this point were not read; no output was written.".to_string())
            .print(None);
    }
}

pub fn lint(lint: &Lint, sources: &IndexMap<String, String>) {
    Msg::Warn(format!(
        "Symbol `{}` is longer than {} characters",
        lint.symbol, lint.limit
    ))
    .print(Some((
        &lint.file,
        lint.line,
        source_line(sources, &lint.file, lint.line),
    )));
}
