use crate::error::{Error, FormatError, Record};
use crate::module::Module;
use arch::{AddrType, Word};

pub const SYMBOL_LIMIT: usize = 8;

/// What to do with symbol names longer than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NamePolicy {
    Ignore,
    #[default]
    Warn,
    Reject,
}

/// A symbol name over the length limit, reported under [`NamePolicy::Warn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    pub file: String,
    pub line: usize,
    pub symbol: String,
    pub limit: usize,
}

// ----------------------------------------------------------------------------
// Reader

/// Reads module records from whitespace separated tokens.
pub struct Reader<'a> {
    file: &'a str,
    // (1-based line, token)
    tokens: Vec<(usize, &'a str)>,
    cursor: usize,
    module: usize,
    record: Record,
    policy: NamePolicy,
    limit: usize,
    lints: Vec<Lint>,
}

impl<'a> Reader<'a> {
    pub fn new(file: &'a str, src: &'a str) -> Self {
        let tokens = src
            .lines()
            .enumerate()
            .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok)))
            .collect();
        Reader {
            file,
            tokens,
            cursor: 0,
            module: 0,
            record: Record::Definitions,
            policy: NamePolicy::default(),
            limit: SYMBOL_LIMIT,
            lints: vec![],
        }
    }

    pub fn policy(mut self, policy: NamePolicy, limit: usize) -> Self {
        self.policy = policy;
        self.limit = limit;
        self
    }

    /// Index given to the first module, so several files can be read in sequence.
    pub fn first_index(mut self, index: usize) -> Self {
        self.module = index;
        self
    }

    pub fn read(mut self) -> Result<(Vec<Module>, Vec<Lint>), Error> {
        let mut modules = vec![];
        while self.cursor < self.tokens.len() {
            modules.push(self.read_module()?);
            self.module += 1;
        }
        Ok((modules, self.lints))
    }

    fn read_module(&mut self) -> Result<Module, Error> {
        let mut module = Module::new(self.module);

        self.record = Record::Definitions;
        for _ in 0..self.count()? {
            let symbol = self.symbol()?;
            let rel = self.number("relative address")?;
            module.definitions.push((symbol, rel));
        }

        self.record = Record::Uses;
        for _ in 0..self.count()? {
            let symbol = self.symbol()?;
            let rel = self.number("relative address")?;
            module.uses.push((symbol, rel));
        }

        self.record = Record::Text;
        for _ in 0..self.count()? {
            let tag = self.tag()?;
            let word = self.word()?;
            module.text.push((tag, word));
        }

        Ok(module)
    }

    fn next(&mut self, what: &'static str) -> Result<(usize, &'a str), Error> {
        match self.tokens.get(self.cursor) {
            Some(&tok) => {
                self.cursor += 1;
                Ok(tok)
            }
            None => {
                let line = self.tokens.last().map(|(line, _)| *line).unwrap_or(1);
                Err(self.fail(line, FormatError::UnexpectedEof(what)))
            }
        }
    }

    fn count(&mut self) -> Result<usize, Error> {
        self.number("count")
    }

    fn number(&mut self, what: &'static str) -> Result<usize, Error> {
        let (line, tok) = self.next(what)?;
        tok.parse::<usize>()
            .map_err(|_| self.fail(line, FormatError::ParseArgument(tok.to_string(), what)))
    }

    fn symbol(&mut self) -> Result<String, Error> {
        let (line, tok) = self.next("symbol")?;
        if tok.chars().count() > self.limit {
            match self.policy {
                NamePolicy::Ignore => {}
                NamePolicy::Warn => self.lints.push(Lint {
                    file: self.file.to_string(),
                    line,
                    symbol: tok.to_string(),
                    limit: self.limit,
                }),
                NamePolicy::Reject => {
                    return Err(self.fail(
                        line,
                        FormatError::SymbolTooLong(tok.to_string(), self.limit),
                    ))
                }
            }
        }
        Ok(tok.to_string())
    }

    fn tag(&mut self) -> Result<AddrType, Error> {
        let (line, tok) = self.next("address type")?;
        AddrType::parse(tok)
            .ok_or_else(|| self.fail(line, FormatError::UnknownAddrType(tok.to_string())))
    }

    fn word(&mut self) -> Result<Word, Error> {
        let (line, tok) = self.next("word")?;
        match tok.parse::<u32>() {
            Ok(_) => Word::parse(tok)
                .ok_or_else(|| self.fail(line, FormatError::WordOverflow(tok.to_string()))),
            Err(_) => Err(self.fail(
                line,
                FormatError::ParseArgument(tok.to_string(), "word"),
            )),
        }
    }

    fn fail(&self, line: usize, kind: FormatError) -> Error {
        Error::Format {
            file: self.file.to_string(),
            line,
            module: self.module,
            record: self.record,
            kind,
        }
    }
}

/// Read `(file, source)` pairs in order. Module indices continue from one
/// source to the next, and a file named twice is read twice.
pub fn read_sources(
    sources: &[(String, String)],
    policy: NamePolicy,
    limit: usize,
) -> Result<(Vec<Module>, Vec<Lint>), Error> {
    let mut modules = vec![];
    let mut lints = vec![];
    for (file, src) in sources {
        let (read, found) = Reader::new(file, src)
            .policy(policy, limit)
            .first_index(modules.len())
            .read()?;
        modules.extend(read);
        lints.extend(found);
    }
    Ok((modules, lints))
}

/// Read a single source with the default name policy.
pub fn read_str(src: &str) -> Result<Vec<Module>, Error> {
    Reader::new("<input>", src).read().map(|(modules, _)| modules)
}
