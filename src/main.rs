use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use snafu::ResultExt;

use bitsyc::error::{ReadInputSnafu, WriteOutputSnafu};
use bitsyc::tokenizer::{TokenKind, tokenize};
use bitsyc::{CompileResult, Target};

/// Translate a Bitsy program into Rust or Swift source.
#[derive(Parser)]
#[command(name = "bitsyc", version)]
struct Cli {
  /// Source file; reads standard input when absent or "-"
  input: Option<PathBuf>,

  /// Write the result here instead of standard output
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Host language to emit
  #[arg(short, long, value_enum, default_value_t = Target::Rust)]
  target: Target,

  /// Print the token stream instead of translating
  #[arg(long)]
  tokens: bool,

  /// Report progress on standard error
  #[arg(short, long)]
  verbose: bool,
}

fn read_source(input: Option<&PathBuf>) -> CompileResult<String> {
  match input {
    Some(path) if path.as_os_str() != "-" => {
      fs::read_to_string(path).context(ReadInputSnafu {
        path: path.display().to_string(),
      })
    }
    _ => {
      let mut text = String::new();
      io::stdin()
        .read_to_string(&mut text)
        .context(ReadInputSnafu { path: "<stdin>" })?;
      Ok(text)
    }
  }
}

fn dump_tokens(source: &str) -> CompileResult<String> {
  let mut out = String::new();
  for token in tokenize(source)? {
    if token.kind == TokenKind::Whitespace {
      continue;
    }
    out.push_str(&format!("{:<12} {:>5}  {}\n", token.kind.name(), token.loc, token.text));
  }
  Ok(out)
}

fn run(cli: &Cli) -> CompileResult<()> {
  let source = read_source(cli.input.as_ref())?;
  if cli.verbose {
    let name = cli
      .input
      .as_ref()
      .map_or_else(|| "<stdin>".to_string(), |path| path.display().to_string());
    eprintln!("Translating {name} ({} bytes) to {:?}...", source.len(), cli.target);
  }

  let output = if cli.tokens {
    dump_tokens(&source)?
  } else {
    bitsyc::translate(&source, cli.target)?
  };

  match &cli.output {
    Some(path) => {
      fs::write(path, &output).context(WriteOutputSnafu {
        path: path.display().to_string(),
      })?;
      if cli.verbose {
        eprintln!("Wrote {} bytes to {}", output.len(), path.display());
      }
    }
    None => print!("{output}"),
  }
  Ok(())
}

fn main() {
  let cli = Cli::parse();
  if let Err(err) = run(&cli) {
    eprintln!("error: {err}");
    process::exit(1);
  }
}
