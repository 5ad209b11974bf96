use indexmap::IndexMap;
use link::report::{self, Report};
use link::{msg, reader, Error, NamePolicy};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files, linked in order. Reads stdin when omitted
    input: Vec<String>,

    /// Output file for the text report. Writes stdout when omitted
    #[clap(short, long)]
    output: Option<String>,

    /// Also write the report as YAML
    #[clap(long)]
    yaml: Option<String>,

    /// Colorize the report written to stdout
    #[clap(long)]
    color: bool,

    /// Handling of symbol names longer than the limit
    #[clap(long, value_enum, default_value_t = NamePolicy::Warn)]
    symbol_names: NamePolicy,

    /// Symbol name length limit
    #[clap(long, default_value_t = reader::SYMBOL_LIMIT)]
    symbol_limit: usize,

    /// Print progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    let mut sources = IndexMap::new();
    if let Err(err) = run(&args, &mut sources) {
        msg::error(&err, &sources);
        std::process::exit(1);
    }
}

fn run(args: &Args, sources: &mut IndexMap<String, String>) -> Result<(), Error> {
    use std::io::Read;

    macro_rules! step {
        ($($arg:tt)*) => {
            if args.verbose {
                eprintln!($($arg)*);
            }
        };
    }

    step!("Two-Pass Linker");
    step!("1. Read Modules");
    let mut inputs = vec![];
    if args.input.is_empty() {
        step!("  < <stdin>");
        let mut src = String::new();
        std::io::stdin()
            .read_to_string(&mut src)
            .map_err(Error::FileRead)?;
        inputs.push(("<stdin>".to_string(), src));
    }
    for path in &args.input {
        step!("  < {}", path);
        let src =
            std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.clone(), e))?;
        inputs.push((path.clone(), src));
    }
    for (file, src) in &inputs {
        sources.entry(file.clone()).or_insert_with(|| src.clone());
    }

    let (modules, lints) = reader::read_sources(&inputs, args.symbol_names, args.symbol_limit)?;
    for lint in &lints {
        msg::lint(lint, sources);
    }
    step!("  {} modules", modules.len());

    step!("2. Pass 1: Symbol Table & Base Addresses");
    step!("3. Pass 2: Relocate & Resolve Use Chains");
    let linked = link::link(&modules);
    step!(
        "  {} symbols, {} words, {} diagnostics",
        linked.symbols.len(),
        linked.memory.len(),
        linked.diagnostics.len()
    );

    step!("4. Write Report");
    match &args.output {
        Some(path) => {
            step!("  > {}", path);
            write_file(path, &report::render(&linked, false))?;
        }
        None => print!("{}", report::render(&linked, args.color)),
    }
    if let Some(path) = &args.yaml {
        step!("  > {}", path);
        let yaml = Report::new(&linked).to_yaml()?;
        write_file(path, &yaml)?;
    }

    Ok(())
}

fn write_file(path: &str, contents: &str) -> Result<(), Error> {
    use std::io::Write;

    let mut file =
        std::fs::File::create(path).map_err(|e| Error::FileCreate(path.to_string(), e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::FileWrite(path.to_string(), e))
}
