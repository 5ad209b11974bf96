use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal machine word.
///
/// The thousands digit is the opcode, the low three digits the address field.
/// Words read from program text are `0..=9999`; relocation may carry past that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(u32);

impl Word {
    pub const MAX: u32 = 9999;
    pub const FIELD: u32 = 1000;
    /// Field value marking the last link of a use chain.
    pub const TERMINATOR: u32 = 777;

    pub fn new(value: u32) -> Option<Self> {
        (value <= Self::MAX).then_some(Word(value))
    }

    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<u32>().ok().and_then(Self::new)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn opcode(self) -> u32 {
        self.0 / Self::FIELD
    }

    pub fn field(self) -> u32 {
        self.0 % Self::FIELD
    }

    pub fn is_terminator(self) -> bool {
        self.field() == Self::TERMINATOR
    }

    /// Replace the address field, keeping the opcode digit.
    pub fn with_field(self, field: usize) -> Self {
        let field = (field % Self::FIELD as usize) as u32;
        Word(self.opcode() * Self::FIELD + field)
    }

    /// Add a module base address to the whole word. The result is not
    /// limited to four digits.
    pub fn relocate(self, base: usize) -> Self {
        Word(self.0 + base as u32)
    }
}

impl From<Word> for u32 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
