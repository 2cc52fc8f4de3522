//! Lexenv CLI
//!
//! Lists and runs the lexical environment walkthroughs.

use lexenvc::commands::{list_scenarios, render_report, run_scenarios};
use lexenvc::config::{parse_args, Command};
use lexenvc::tracing_setup::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint_usage();
            std::process::exit(1);
        }
    };

    match command {
        Command::Help => print_usage(),
        Command::List => {
            for line in list_scenarios() {
                println!("{line}");
            }
        }
        Command::Run { target, config } => {
            init_tracing(config.verbose);
            let reports = match run_scenarios(&target) {
                Ok(reports) => reports,
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!();
                    eprint_usage();
                    std::process::exit(1);
                }
            };

            let mut failed = false;
            for report in &reports {
                print!("{}", render_report(report, config));
                if let Some(err) = &report.error {
                    eprintln!("error: {err}");
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
    }
}

const USAGE: &str = "\
Lexenv - lexical environment walkthroughs

Usage: lexenv <command> [options]

Commands:
  list                 List available scenarios
  run <scenario>|all   Run one scenario, or every scenario in order
  help                 Show this message

Run options:
  --dump               Print scope chain snapshots after each transcript
  -v, --verbose        Trace engine events to stderr (RUST_LOG overrides)";

fn print_usage() {
    println!("{USAGE}");
}

fn eprint_usage() {
    eprintln!("{USAGE}");
}
