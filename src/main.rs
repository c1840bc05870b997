#![forbid(unsafe_code)]
#![deny(warnings, unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use surf_sdk::{generate_types, init_tracing};

#[derive(Parser)]
#[command(
    name = "surf-gen",
    version,
    about = "Generate the TypeScript SDK bindings from the surf program IDL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding files from an IDL document
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Path of the IDL JSON document
    #[arg(long = "idl", value_name = "FILE")]
    idl_path: PathBuf,
    /// Directory the generated files are written to
    #[arg(long = "out", value_name = "DIR")]
    out_dir: PathBuf,
}

fn run_generate(args: GenerateArgs) -> i32 {
    match generate_types(&args.idl_path, &args.out_dir) {
        Ok(()) => {
            println!("regenerated");
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Generate(args) => run_generate(args),
    };
    std::process::exit(code);
}
