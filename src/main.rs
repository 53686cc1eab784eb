use std::{
    fs,
    io::{self, BufWriter, Write},
};

use anyhow::Context;
use clap::{crate_version, App, Arg, ArgMatches};
use tracing_subscriber::EnvFilter;

use kaleidoscope_frontend::{
    cursor::Cursor,
    driver::{Driver, Options, DEFAULT_PROMPT},
    input::ReadChars,
    lexer::{lex, Lexer, Token},
    parser::Parser,
    precedence::PrecedenceTable,
};

fn app() -> App<'static, 'static> {
    App::new("kaleidoscope")
        .version(crate_version!())
        .about("parses kaleidoscope source into an AST, reporting each top-level unit")
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .help("source file to read, standard input when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("prompt")
                .long("prompt")
                .value_name("TEXT")
                .help("text written before each top-level unit")
                .takes_value(true)
                .default_value(DEFAULT_PROMPT),
        )
        .arg(
            Arg::with_name("binop")
                .long("binop")
                .value_name("SYM=PREC")
                .help("add or override a binary operator precedence")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("dump-ast")
                .long("dump-ast")
                .help("print each parsed unit as an s-expression"),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("print the token stream and exit without parsing"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("raise the default log level (debug, then trace)"),
        )
}

fn init_logging(verbosity: u64) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .init();
}

fn precedence_table(matches: &ArgMatches) -> anyhow::Result<PrecedenceTable> {
    let mut table = PrecedenceTable::default();
    for spec in matches.values_of("binop").into_iter().flatten() {
        table
            .insert_spec(spec)
            .with_context(|| format!("invalid --binop {}", spec))?;
    }
    Ok(table)
}

fn print_tokens(tokens: impl IntoIterator<Item = Token>) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    out.flush()?;
    Ok(())
}

fn run<I: Iterator<Item = char>>(chars: I, matches: &ArgMatches) -> anyhow::Result<()> {
    if matches.is_present("tokens") {
        return print_tokens(Lexer::new(chars));
    }

    let options = Options {
        prompt: matches.value_of("prompt").unwrap_or(DEFAULT_PROMPT).to_string(),
        dump_ast: matches.is_present("dump-ast"),
    };
    let parser = Parser::new(Cursor::new(Lexer::new(chars)), precedence_table(matches)?);

    let stderr = io::stderr();
    let mut driver = Driver::new(parser, stderr.lock(), options);
    let summary = driver.run()?;
    tracing::info!(parsed = summary.parsed, failed = summary.failed, "done");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    match matches.value_of("input") {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read input file {}", path))?;
            let source = String::from_utf8_lossy(&bytes);
            if matches.is_present("tokens") {
                return print_tokens(lex(&source));
            }
            run(source.chars(), &matches)
        }
        None => {
            let stdin = io::stdin();
            run(ReadChars::new(stdin.lock()), &matches)
        }
    }
}
