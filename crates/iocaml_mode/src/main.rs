//! iocaml highlighter CLI
//!
//! Scans a source file with the notebook mode's scanner and prints the
//! result.

use iocaml_mode::commands::{html_output, json_output, lex_output, static_html_output};
use iocaml_scanner::Scanner;

fn main() {
    iocaml_mode::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    let path = &args[2];

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    };

    let scanner = Scanner::ocaml();
    match command.as_str() {
        "lex" => print!("{}", lex_output(&scanner, path, &source)),
        "html" => print!("{}", html_output(&scanner, &source)),
        "static" => print!("{}", static_html_output(&scanner, &source)),
        "json" => match json_output(&scanner, &source) {
            Ok(out) => print!("{out}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: iocaml-hl <command> <file>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lex <file>    Dump classified tokens");
    eprintln!("  html <file>   Render highlighted HTML");
    eprintln!("  static <file> Render static-block HTML");
    eprintln!("  json <file>   Dump tokens as JSON");
}
