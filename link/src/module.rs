use arch::{AddrType, Word};

/// One compilation unit as produced by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub index: usize,
    pub definitions: Vec<(String, usize)>,
    pub uses: Vec<(String, usize)>,
    pub text: Vec<(AddrType, Word)>,
}

impl Module {
    pub fn new(index: usize) -> Self {
        Module {
            index,
            ..Default::default()
        }
    }

    pub fn define(mut self, symbol: &str, rel: usize) -> Self {
        self.definitions.push((symbol.to_string(), rel));
        self
    }

    pub fn uses(mut self, symbol: &str, rel: usize) -> Self {
        self.uses.push((symbol.to_string(), rel));
        self
    }

    pub fn word(mut self, tag: AddrType, word: Word) -> Self {
        self.text.push((tag, word));
        self
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
