use arch::AddrType;
use serde::Serialize;
use thiserror::Error;

/// Non-fatal findings of both passes. Each one is keyed either by a symbol
/// name or by an absolute address.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("This variable is multiply defined; first value used.")]
    MultiplyDefined { symbol: String },

    #[error("The value of {symbol} is outside of module {module}; zero (relative) used")]
    DefinitionOutOfRange { symbol: String, module: usize },

    #[error("{symbol} is not defined; zero used instead")]
    UndefinedSymbolUse { addr: usize, symbol: String },

    #[error("Pointer in use chain exceeds module size; chain terminated.")]
    ChainExceedsModuleSize { addr: usize },

    #[error("Use chain loops back on itself; chain terminated.")]
    ChainCycle { addr: usize },

    #[error("{tag} type address on use chain; treated as E type.")]
    ChainWrongTypeLink { addr: usize, tag: AddrType },

    #[error("E type address not on use chain; treated as I type.")]
    UnusedEType { addr: usize },

    #[error("Use of {symbol} in module {module} is outside of the module; ignored.")]
    UseOutOfRange { symbol: String, module: usize },

    #[error("{symbol} is used in module {module} but never defined.")]
    UseNotDefined { symbol: String, module: usize },

    #[error("{symbol} was defined in module {module} but never used.")]
    UnusedDefinition { symbol: String, module: usize },
}

impl Diagnostic {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Diagnostic::MultiplyDefined { symbol }
            | Diagnostic::DefinitionOutOfRange { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    pub fn addr(&self) -> Option<usize> {
        match self {
            Diagnostic::UndefinedSymbolUse { addr, .. }
            | Diagnostic::ChainExceedsModuleSize { addr }
            | Diagnostic::ChainCycle { addr }
            | Diagnostic::ChainWrongTypeLink { addr, .. }
            | Diagnostic::UnusedEType { addr } => Some(*addr),
            _ => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::UseOutOfRange { .. }
                | Diagnostic::UseNotDefined { .. }
                | Diagnostic::UnusedDefinition { .. }
        )
    }

    // Lower rank wins when a row could carry several annotations.
    fn rank(&self) -> u8 {
        match self {
            Diagnostic::MultiplyDefined { .. } => 0,
            Diagnostic::DefinitionOutOfRange { .. } => 1,
            Diagnostic::UndefinedSymbolUse { .. } => 0,
            Diagnostic::ChainExceedsModuleSize { .. } => 1,
            Diagnostic::ChainCycle { .. } => 2,
            Diagnostic::ChainWrongTypeLink { .. } => 3,
            Diagnostic::UnusedEType { .. } => 4,
            Diagnostic::UseOutOfRange { .. } => 0,
            Diagnostic::UseNotDefined { .. } => 0,
            Diagnostic::UnusedDefinition { .. } => 1,
        }
    }
}

/// Append-only catalog shared by pass 1 and pass 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics(Vec::new())
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.0.push(diag);
    }

    pub fn contains(&self, diag: &Diagnostic) -> bool {
        self.0.contains(diag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The annotation shown beside a symbol table row.
    pub fn for_symbol(&self, symbol: &str) -> Option<&Diagnostic> {
        self.0
            .iter()
            .filter(|d| d.symbol() == Some(symbol))
            .min_by_key(|d| d.rank())
    }

    /// The annotation shown beside a memory map row.
    pub fn for_addr(&self, addr: usize) -> Option<&Diagnostic> {
        self.0
            .iter()
            .filter(|d| d.addr() == Some(addr))
            .min_by_key(|d| d.rank())
    }

    /// Trailing warnings, problems with uses first, in record order.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        let mut warnings: Vec<_> = self.0.iter().filter(|d| d.is_warning()).collect();
        warnings.sort_by_key(|d| d.rank());
        warnings
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
