use clap::Parser;
use regexc::bytes::print_byte;
use regexc::nfa::Nfa;
use regexc::table::Table;
use regexc::tree::{Definitions, ExprTree};
use regexc::{CompileError, Dfa, EmitOptions};
use std::io::{Read, Write};
use std::process::ExitCode;

/// Compiles a regular expression into a standalone C recognizer.
#[derive(Parser, Debug)]
#[command(name = "regex2c", version, about)]
struct Args {
    /// Dump the expression tree, NFA, DFA, and minimized DFA before the generated C code.
    #[arg(short, long)]
    debug: bool,

    /// Write output to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Input file(s); `-` or no FILE means standard input. Multiple files are concatenated in
    /// argument order, as if chained into one input stream.
    files: Vec<String>,
}

fn read_inputs(files: &[String]) -> Result<String, CompileError> {
    if files.is_empty() {
        return read_stdin();
    }
    let mut combined = String::new();
    for name in files {
        if name == "-" {
            combined.push_str(&read_stdin()?);
        } else {
            let text = std::fs::read_to_string(name).map_err(regexc::error::resource_err)?;
            combined.push_str(&text);
        }
    }
    Ok(combined)
}

fn read_stdin() -> Result<String, CompileError> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).map_err(regexc::error::resource_err)?;
    Ok(buf)
}

/// Renders an expression tree using the byte-printing utility for every literal byte, rather
/// than derive-`Debug`'s raw `u8` values.
fn dump_tree(tree: &ExprTree) -> String {
    match tree {
        ExprTree::Char(b) => format!("Char({})", print_byte(*b as i32)),
        ExprTree::Class(mask) => {
            let members: Vec<String> = mask.iter_members(false).map(|b| print_byte(b as i32)).collect();
            format!("Class[{}]", members.join(","))
        }
        ExprTree::InvClass(mask) => {
            let members: Vec<String> = mask.iter_members(false).map(|b| print_byte(b as i32)).collect();
            format!("InvClass[^{}]", members.join(","))
        }
        ExprTree::Wildcard => "Wildcard".to_string(),
        ExprTree::Concat(children) => format!(
            "Concat({})",
            children.iter().map(|c| dump_tree(c)).collect::<Vec<_>>().join(", ")
        ),
        ExprTree::Alt(children) => format!(
            "Alt({})",
            children.iter().map(|c| dump_tree(c)).collect::<Vec<_>>().join(", ")
        ),
        ExprTree::Star(c) => format!("Star({})", dump_tree(c)),
        ExprTree::Plus(c) => format!("Plus({})", dump_tree(c)),
        ExprTree::Opt(c) => format!("Opt({})", dump_tree(c)),
        ExprTree::Ref(target) => format!("Ref({})", dump_tree(target)),
    }
}

/// One row per node: its end tag and its outgoing edges, each rendered `byte->target` (`ε` for
/// an epsilon move) with the byte printed via the byte-printing utility.
fn dump_nfa(nfa: &Nfa) -> String {
    let mut table = Table::default();
    table.push_row(vec!["state".to_string(), "end_tag".to_string(), "edges".to_string()]);
    for (i, node) in nfa.nodes.iter().enumerate() {
        let marker = if i == nfa.start { "->" } else { "" };
        let edges: Vec<String> = node
            .edges
            .iter()
            .map(|&(byte, target)| match byte {
                Some(b) => format!("{}->{}", print_byte(b as i32), target),
                None => format!("ε->{}", target),
            })
            .collect();
        table.push_row(vec![
            format!("{marker}{i}"),
            node.end_tag.to_string(),
            edges.join(" "),
        ]);
    }
    table.to_string(" | ")
}

/// One row per state: its end tag and its outgoing byte ranges coalesced the same way the
/// emitter coalesces `case` labels, each range's endpoints rendered via the byte-printing
/// utility.
fn dump_dfa(name: &str, dfa: &Dfa) -> String {
    let mut table = Table::default();
    table.push_row(vec!["state".to_string(), "end_tag".to_string(), "ranges".to_string()]);
    for state in 0..dfa.num_states() {
        let marker = if state == dfa.start() { "->" } else { "" };
        let mut ranges = Vec::new();
        let mut byte = 0u32;
        while byte < 256 {
            let target = dfa.transition(state, byte as u8);
            if target == regexc::dfa::NO_TRANSITION {
                byte += 1;
                continue;
            }
            let lo = byte;
            while byte + 1 < 256 && dfa.transition(state, (byte + 1) as u8) == target {
                byte += 1;
            }
            let range = if lo == byte {
                print_byte(lo as i32)
            } else {
                format!("{}..{}", print_byte(lo as i32), print_byte(byte as i32))
            };
            ranges.push(format!("{range}->{target}"));
            byte += 1;
        }
        table.push_row(vec![
            format!("{marker}{state}"),
            dfa.end_tag(state).to_string(),
            ranges.join(" "),
        ]);
    }
    format!("; {name} ({} states)\n{}", dfa.num_states(), table.to_string(" | "))
}

fn run(args: &Args) -> Result<String, CompileError> {
    let source = read_inputs(&args.files)?;
    let pattern = source.trim_end_matches(['\n', '\r']);

    let defs = Definitions::new();
    let tree = regexc::parser::parse(pattern, &defs)?;
    let nfa = Nfa::from_tree(&tree)?;
    let dfa = Dfa::from_nfa(&nfa);
    let minimized = dfa.minimized();

    let mut out = String::new();
    if args.debug {
        out.push_str(&format!("; expression tree: {}\n", dump_tree(&tree)));
        out.push_str(&format!("; nfa ({} states)\n{}\n", nfa.len(), dump_nfa(&nfa)));
        out.push_str(&dump_dfa("dfa", &dfa));
        out.push('\n');
        out.push_str(&dump_dfa("minimized dfa", &minimized));
        out.push('\n');
    }
    out.push_str(&regexc::emit::emit(&minimized, &EmitOptions::default())?);
    Ok(out)
}

fn write_output(args: &Args, code: &str) -> Result<(), CompileError> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, code).map_err(regexc::error::resource_err)?;
        }
        None => {
            print!("{code}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    }

    match run(&args) {
        Ok(code) => match write_output(&args, &code) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("regex2c: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            match e.position() {
                Some(pos) => eprintln!("Rejected at byte {pos}: {e}"),
                None => eprintln!("regex2c: {e}"),
            }
            let _ = std::io::stderr().flush();
            ExitCode::FAILURE
        }
    }
}
