use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use idk_syntax::{Error, Recovered, parse, parse_recovering, tokenize};
use miette::{IntoDiagnostic, NamedSource, Report, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "idk", version)]
#[command(about = "Tokenize and parse an idk source file")]
struct Args {
    /// Source file to read
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parsed declarations
    #[arg(long)]
    ast: bool,

    /// Keep parsing after an error and report every error found
    #[arg(long)]
    recover: bool,

    /// Log more: -v for debug, -vv for trace (RUST_LOG overrides)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn show_tokens(&self) -> bool {
        self.tokens || !self.ast
    }

    fn show_ast(&self) -> bool {
        self.ast || !self.tokens
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> miette::Result<()> {
    let source = fs::read_to_string(&args.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", args.file.display()))?;
    info!(file = %args.file.display(), bytes = source.len(), "read source");

    let name = args.file.display().to_string();
    front_end(args, &source)
        .map_err(|err| Report::new(err).with_source_code(NamedSource::new(name, source.clone())))
}

fn front_end(args: &Args, source: &str) -> Result<(), Error> {
    let tokens = tokenize(source)?;
    if args.show_tokens() {
        println!("{tokens}");
    }

    let recovered = if args.recover {
        parse_recovering(&tokens)
    } else {
        Recovered {
            program: parse(&tokens)?,
            errors: Vec::new(),
        }
    };
    if args.show_ast() && !recovered.program.is_empty() {
        println!("{}", recovered.program);
    }

    let program = recovered.into_result()?;
    info!(declarations = program.len(), "parsed");
    Ok(())
}
