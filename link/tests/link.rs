use link::reader::{read_sources, read_str, SYMBOL_LIMIT};
use link::NamePolicy;
use link::report::render;
use link::{link, Diagnostic, Linked};

fn run(src: &str) -> Linked {
    let modules = read_str(src).unwrap();
    let first = link(&modules);
    // Same input, same output.
    assert_eq!(first, link(&modules));
    first
}

fn values(linked: &Linked) -> Vec<u32> {
    linked.memory.iter().map(|w| w.value()).collect()
}

macro_rules! case {
    ($name:ident, $src:expr, $memory:expr) => {
        #[test]
        fn $name() {
            let linked = run($src);
            println!("{}", render(&linked, false));
            assert_eq!(values(&linked), $memory);
        }
    };
}

// Two modules, the second resolving X through a single terminal link.
const TWO_MODULES: &str = "1 X 0  0  2 A 111 R 50\n0  1 X 0  2 E 777 I 99";

#[test]
fn two_modules_clean() {
    let linked = run(TWO_MODULES);
    assert_eq!(linked.symbols.get_val("X"), Some(0));
    assert_eq!(linked.bases, vec![0, 2]);
    assert_eq!(values(&linked), vec![111, 50, 0, 99]);
    assert!(linked.diagnostics.is_empty());
    assert!(linked.used.contains("X"));
}

#[test]
fn undefined_without_definer() {
    let linked = run("0  1 X 0  2 E 777 I 99");
    assert_eq!(values(&linked), vec![0, 99]);
    assert_eq!(
        linked.diagnostics.for_addr(0),
        Some(&Diagnostic::UndefinedSymbolUse {
            addr: 0,
            symbol: "X".to_string()
        })
    );
    assert!(linked.symbols.is_empty());
}

#[test]
fn undefined_after_other_module() {
    let linked = run("0 0 2 A 111 R 50\n0  1 X 0  2 E 777 I 99");
    assert_eq!(values(&linked), vec![111, 50, 0, 99]);
    assert_eq!(
        linked.diagnostics.for_addr(2),
        Some(&Diagnostic::UndefinedSymbolUse {
            addr: 2,
            symbol: "X".to_string()
        })
    );
}

// Classic four-module input.
case!(
    four_modules,
    "1 xy 2
     2 z 2 xy 4
     5 R 1004 I 5678 E 2777 R 8002 E 7777
     0
     1 z 3
     6 R 8001 E 1777 E 1001 E 3002 R 1002 A 1010
     0
     1 z 1
     2 R 5001 E 4777
     1 z 2
     2 xy 2
     3 A 8000 E 1777 E 2001",
    vec![
        1004, 5678, 2015, 8002, 7002, // module 0
        8006, 1015, 1015, 3015, 1007, 1010, // module 1
        5012, 4015, // module 2
        8000, 1002, 2002, // module 3
    ]
);

#[test]
fn four_modules_symbols() {
    let linked = run("1 xy 2
     2 z 2 xy 4
     5 R 1004 I 5678 E 2777 R 8002 E 7777
     0
     1 z 3
     6 R 8001 E 1777 E 1001 E 3002 R 1002 A 1010
     0
     1 z 1
     2 R 5001 E 4777
     1 z 2
     2 xy 2
     3 A 8000 E 1777 E 2001");
    assert_eq!(linked.bases, vec![0, 5, 11, 13]);
    let symbols: Vec<_> = linked
        .symbols
        .iter()
        .map(|(name, sym)| (name.to_string(), sym.addr))
        .collect();
    assert_eq!(
        symbols,
        vec![("xy".to_string(), 2), ("z".to_string(), 15)]
    );
    assert!(linked.diagnostics.is_empty());
}

#[test]
fn multiply_defined_recorded_once() {
    let linked = run("1 X 1  0  2 A 0 A 0
                      1 X 0  0  1 A 0
                      1 X 0  1 X 0  1 E 777");
    assert_eq!(linked.symbols.get_val("X"), Some(1));
    let count = linked
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::MultiplyDefined { .. }))
        .count();
    assert_eq!(count, 1);
    assert_eq!(values(&linked), vec![0, 0, 0, 1]);
}

#[test]
fn definition_out_of_range() {
    let linked = run("0 0 3 A 0 A 0 A 0\n1 Y 5  1 Y 0  2 E 777 A 0");
    assert_eq!(linked.symbols.get_val("Y"), Some(3));
    assert_eq!(
        linked.diagnostics.for_symbol("Y"),
        Some(&Diagnostic::DefinitionOutOfRange {
            symbol: "Y".to_string(),
            module: 1
        })
    );
    assert_eq!(values(&linked), vec![0, 0, 0, 3, 0]);
}

#[test]
fn every_external_slot_is_visited_or_flagged() {
    let linked = run("1 X 0  1 X 2  4 E 1777 E 2777 E 3000 E 4777");
    // Chain 2 -> 0 -> end; slots 1 and 3 are never visited.
    assert_eq!(values(&linked), vec![1000, 2777, 3000, 4777]);
    let unused: Vec<_> = linked
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnusedEType { addr } => Some(*addr),
            _ => None,
        })
        .collect();
    assert_eq!(unused, vec![1, 3]);
    assert_eq!(linked.diagnostics.for_addr(0), None);
    assert_eq!(linked.diagnostics.for_addr(2), None);
}

#[test]
fn chain_exceeding_module_size() {
    let linked = run("1 X 0  1 X 0  2 E 1009 A 2000");
    assert_eq!(values(&linked), vec![1000, 2000]);
    assert_eq!(
        linked.diagnostics.for_addr(0),
        Some(&Diagnostic::ChainExceedsModuleSize { addr: 0 })
    );
}

#[test]
fn unused_definition_warning() {
    let linked = run("2 A 0 B 1  0  2 I 0 I 0\n0  1 A 0  1 E 777");
    assert_eq!(
        linked.diagnostics.warnings(),
        vec![&Diagnostic::UnusedDefinition {
            symbol: "B".to_string(),
            module: 0
        }]
    );
    let text = render(&linked, false);
    assert!(text.ends_with("\nWarning: B was defined in module 0 but never used.\n"));
}

#[test]
fn empty_input() {
    let linked = run("");
    assert!(linked.memory.is_empty());
    assert_eq!(render(&linked, false), "Symbol Table\n\nMemory Map\n");
}

#[test]
fn same_file_twice_links_two_copies() {
    let inputs = vec![
        ("lib.obj".to_string(), "1 X 1  0  2 A 111 R 1".to_string()),
        ("lib.obj".to_string(), "1 X 1  0  2 A 111 R 1".to_string()),
    ];
    let (modules, _) = read_sources(&inputs, NamePolicy::Warn, SYMBOL_LIMIT).unwrap();
    let linked = link(&modules);
    assert_eq!(linked.bases, vec![0, 2]);
    assert_eq!(values(&linked), vec![111, 1, 111, 3]);
    assert_eq!(linked.symbols.get_val("X"), Some(1));
    assert!(linked
        .diagnostics
        .contains(&Diagnostic::MultiplyDefined {
            symbol: "X".to_string()
        }));
}
