use crate::diag::Diagnostic;
use crate::resolve::Linked;
use arch::Word;
use color_print::cformat;
use serde::Serialize;

// ----------------------------------------------------------------------------
// Text

fn annotate(colored: bool, diag: &Diagnostic) -> String {
    if colored {
        cformat!(" <red,bold>Error</>: {}", diag)
    } else {
        format!(" Error: {}", diag)
    }
}

fn warning(colored: bool, diag: &Diagnostic) -> String {
    if colored {
        cformat!("<yellow,bold>Warning</>: {}", diag)
    } else {
        format!("Warning: {}", diag)
    }
}

/// Render the symbol table, memory map and trailing warnings.
pub fn render(linked: &Linked, colored: bool) -> String {
    let mut out = String::new();

    out.push_str("Symbol Table\n");
    for (name, symbol) in linked.symbols.iter() {
        out.push_str(&format!("{} = {}", name, symbol.addr));
        if let Some(diag) = linked.diagnostics.for_symbol(name) {
            out.push_str(&annotate(colored, diag));
        }
        out.push('\n');
    }

    out.push_str("\nMemory Map\n");
    for (addr, word) in linked.memory.iter().enumerate() {
        out.push_str(&format!("{:<4}{}", format!("{}:", addr), word));
        if let Some(diag) = linked.diagnostics.for_addr(addr) {
            out.push_str(&annotate(colored, diag));
        }
        out.push('\n');
    }

    let warnings = linked.diagnostics.warnings();
    if !warnings.is_empty() {
        out.push('\n');
        for diag in warnings {
            out.push_str(&warning(colored, diag));
            out.push('\n');
        }
    }

    out
}

// ----------------------------------------------------------------------------
// YAML

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub symbols: Vec<SymbolRow<'a>>,
    pub memory: Vec<MemoryRow<'a>>,
    pub warnings: Vec<&'a Diagnostic>,
}

#[derive(Debug, Serialize)]
pub struct SymbolRow<'a> {
    pub name: &'a str,
    pub addr: usize,
    pub module: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a Diagnostic>,
}

#[derive(Debug, Serialize)]
pub struct MemoryRow<'a> {
    pub addr: usize,
    pub word: Word,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a Diagnostic>,
}

impl<'a> Report<'a> {
    pub fn new(linked: &'a Linked) -> Self {
        let symbols = linked
            .symbols
            .iter()
            .map(|(name, symbol)| SymbolRow {
                name,
                addr: symbol.addr,
                module: symbol.module,
                error: linked.diagnostics.for_symbol(name),
            })
            .collect();
        let memory = linked
            .memory
            .iter()
            .enumerate()
            .map(|(addr, &word)| MemoryRow {
                addr,
                word,
                error: linked.diagnostics.for_addr(addr),
            })
            .collect();
        Report {
            symbols,
            memory,
            warnings: linked.diagnostics.warnings(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use crate::resolve::link;
    use arch::AddrType;

    fn w(value: u32) -> Word {
        Word::new(value).unwrap()
    }

    #[test]
    fn plain_text_layout() {
        let modules = vec![
            Module::new(0)
                .define("X", 1)
                .define("W", 0)
                .word(AddrType::Absolute, w(1010))
                .word(AddrType::External, w(2777)),
            Module::new(1)
                .define("X", 0)
                .uses("X", 0)
                .word(AddrType::External, w(3777)),
        ];
        let text = render(&link(&modules), false);
        let expected = "\
Symbol Table
X = 1 Error: This variable is multiply defined; first value used.
W = 0

Memory Map
0:  1010
1:  2777 Error: E type address not on use chain; treated as I type.
2:  3001

Warning: W was defined in module 0 but never used.
";
        assert_eq!(text, expected);
    }

    #[test]
    fn yaml_rows() {
        let modules = vec![Module::new(0)
            .uses("Q", 0)
            .word(AddrType::External, w(1777))];
        let linked = link(&modules);
        let yaml = Report::new(&linked).to_yaml().unwrap();
        assert!(yaml.contains("symbols: []"));
        assert!(yaml.contains("word: 1000"));
        assert!(yaml.contains("kind: undefined_symbol_use"));
        assert!(yaml.contains("symbol: Q"));
    }
}
