use crate::diag::{Diagnostic, Diagnostics};
use crate::module::Module;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Absolute address.
    pub addr: usize,
    /// Index of the defining module.
    pub module: usize,
}

/// Global symbol table, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable(IndexMap<String, Symbol>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Insert unless already present. Returns the entry that was kept.
    pub fn insert(&mut self, name: &str, symbol: Symbol) -> Result<(), Symbol> {
        match self.0.get(name) {
            Some(prev) => Err(*prev),
            None => {
                self.0.insert(name.to_string(), symbol);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.0.get(name)
    }

    pub fn get_val(&self, name: &str) -> Option<usize> {
        self.0.get(name).map(|sym| sym.addr)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.0.iter().map(|(name, sym)| (name.as_str(), sym))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of pass 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub symbols: SymbolTable,
    /// Base address per module index.
    pub bases: Vec<usize>,
    pub diagnostics: Diagnostics,
}

/// Pass 1: assign base addresses and collect definitions.
pub fn build(modules: &[Module]) -> Layout {
    let mut symbols = SymbolTable::new();
    let mut bases = Vec::with_capacity(modules.len());
    let mut diagnostics = Diagnostics::new();
    let mut base = 0;

    for module in modules {
        bases.push(base);

        for (name, rel) in &module.definitions {
            let rel = if *rel >= module.len() {
                diagnostics.push(Diagnostic::DefinitionOutOfRange {
                    symbol: name.clone(),
                    module: module.index,
                });
                0
            } else {
                *rel
            };

            let symbol = Symbol {
                addr: base + rel,
                module: module.index,
            };
            if symbols.insert(name, symbol).is_err() {
                let diag = Diagnostic::MultiplyDefined {
                    symbol: name.clone(),
                };
                if !diagnostics.contains(&diag) {
                    diagnostics.push(diag);
                }
            }
        }

        base += module.len();
    }

    Layout {
        symbols,
        bases,
        diagnostics,
    }
}
