use crate::diag::{Diagnostic, Diagnostics};
use crate::module::Module;
use crate::symbols::{self, Layout, SymbolTable};
use arch::{AddrType, Word};
use indexmap::IndexSet;

/// Result of a complete linking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linked {
    pub symbols: SymbolTable,
    pub bases: Vec<usize>,
    pub memory: Vec<Word>,
    pub diagnostics: Diagnostics,
    /// Every symbol named in some use list.
    pub used: IndexSet<String>,
}

/// Pass 2 output before the unused-definition sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub memory: Vec<Word>,
    pub diagnostics: Diagnostics,
    pub used: IndexSet<String>,
}

/// Run pass 1, pass 2 and the unused-definition sweep.
pub fn link(modules: &[Module]) -> Linked {
    let layout = symbols::build(modules);
    let Resolved {
        memory,
        mut diagnostics,
        used,
    } = resolve(modules, &layout);

    for (name, symbol) in layout.symbols.iter() {
        if !used.contains(name) {
            diagnostics.push(Diagnostic::UnusedDefinition {
                symbol: name.to_string(),
                module: symbol.module,
            });
        }
    }

    Linked {
        symbols: layout.symbols,
        bases: layout.bases,
        memory,
        diagnostics,
        used,
    }
}

/// Pass 2: relocate every word and patch the use chains.
pub fn resolve(modules: &[Module], layout: &Layout) -> Resolved {
    let total = modules.iter().map(Module::len).sum();
    let mut memory = Vec::with_capacity(total);
    let mut diagnostics = layout.diagnostics.clone();
    let mut used = IndexSet::new();

    for (module, &base) in modules.iter().zip(&layout.bases) {
        let mut pending = IndexSet::new();

        for (rel, &(tag, word)) in module.text.iter().enumerate() {
            let word = match tag {
                AddrType::Relocatable => word.relocate(base),
                AddrType::Absolute | AddrType::Immediate => word,
                AddrType::External => {
                    pending.insert(base + rel);
                    word
                }
            };
            memory.push(word);
        }

        for (name, start) in &module.uses {
            used.insert(name.clone());

            if *start >= module.len() {
                diagnostics.push(Diagnostic::UseOutOfRange {
                    symbol: name.clone(),
                    module: module.index,
                });
                if !layout.symbols.contains(name) {
                    diagnostics.push(Diagnostic::UseNotDefined {
                        symbol: name.clone(),
                        module: module.index,
                    });
                }
                continue;
            }

            let value = match layout.symbols.get_val(name) {
                Some(addr) => addr,
                None => {
                    diagnostics.push(Diagnostic::UndefinedSymbolUse {
                        addr: base + start,
                        symbol: name.clone(),
                    });
                    0
                }
            };

            let mut chain = Chain {
                module,
                base,
                value,
                memory: &mut memory,
                diagnostics: &mut diagnostics,
                pending: &mut pending,
            };
            chain.walk(*start);
        }

        for addr in pending {
            diagnostics.push(Diagnostic::UnusedEType { addr });
        }
    }

    Resolved {
        memory,
        diagnostics,
        used,
    }
}

// One use-list entry being followed through its module.
struct Chain<'a> {
    module: &'a Module,
    base: usize,
    value: usize,
    memory: &'a mut Vec<Word>,
    diagnostics: &'a mut Diagnostics,
    pending: &'a mut IndexSet<usize>,
}

impl Chain<'_> {
    fn walk(&mut self, start: usize) {
        let mut visited = IndexSet::new();
        let mut rel = start;

        loop {
            let addr = self.base + rel;
            if !visited.insert(rel) {
                self.diagnostics.push(Diagnostic::ChainCycle { addr });
                break;
            }

            // Links are always read from the original text.
            let (tag, word) = self.module.text[rel];
            if tag != AddrType::External {
                self.diagnostics
                    .push(Diagnostic::ChainWrongTypeLink { addr, tag });
            }
            self.pending.shift_remove(&addr);
            self.memory[addr] = self.memory[addr].with_field(self.value);

            if word.is_terminator() {
                break;
            }
            let next = word.field() as usize;
            if next >= self.module.len() {
                self.diagnostics
                    .push(Diagnostic::ChainExceedsModuleSize { addr });
                break;
            }
            rel = next;
        }
    }
}
