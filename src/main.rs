use std::process;

use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};
use log::error;

use onefactor::error::{USAGE_EXIT_CODE, VALIDATION_EXIT_CODE};
use onefactor::pipeline::{run_paths, FilterConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            if let Err(io) = e.print() {
                error!("cannot print usage: {io}");
            }
            process::exit(exit_code_for(&e));
        }
    };

    let (config, args) = match matches.subcommand() {
        Some(("c4", args)) => (FilterConfig::c4_stage(), args),
        Some(("k4e", args)) => (FilterConfig::k4e_stage(), args),
        Some(("both", args)) => (FilterConfig::two_stage(), args),
        Some(("validate", _)) => validate(),
        _ => process::exit(USAGE_EXIT_CODE),
    };

    let (input, output) = paths(args);
    if let Err(e) = run_paths(&config, input, output) {
        error!("{e}");
        process::exit(e.exit_code());
    }
}

/// Help and version requests succeed; every other parse failure is a usage error.
fn exit_code_for(e: &clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

fn validate() -> ! {
    match onefactor::validate::validate_known_factorizations() {
        Ok(()) => {
            println!("Validation OK: bundled factorizations are correct.");
            process::exit(0)
        }
        Err(e) => {
            eprintln!("Validation FAILED: {e}");
            process::exit(VALIDATION_EXIT_CODE)
        }
    }
}

fn paths(args: &ArgMatches) -> (&str, &str) {
    let input = args.get_one::<String>("input");
    let output = args.get_one::<String>("output");
    match (input, output) {
        (Some(input), Some(output)) => (input.as_str(), output.as_str()),
        _ => process::exit(USAGE_EXIT_CODE),
    }
}

fn file_args(cmd: Command, input_help: &'static str, output_help: &'static str) -> Command {
    cmd.arg(Arg::new("input").help(input_help).required(true))
        .arg(Arg::new("output").help(output_help).required(true))
}

fn cli() -> Command {
    Command::new("onefactor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Filters 1-factorizations of K12 by the C4 and 2K4-e conditions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(file_args(
            Command::new("c4").about("Read incidence blocks, keep C4 survivors as compact strings"),
            "Incidence-block file, or - for stdin",
            "File for compact strings of the survivors",
        ))
        .subcommand(file_args(
            Command::new("k4e").about("Read compact strings, keep 2K4-e survivors as edge lists"),
            "Compact-string file, or - for stdin",
            "File for edge lists of the survivors",
        ))
        .subcommand(file_args(
            Command::new("both")
                .about("Read incidence blocks, keep survivors of both tests as edge lists"),
            "Incidence-block file, or - for stdin",
            "File for edge lists of the survivors",
        ))
        .subcommand(
            Command::new("validate")
                .about("Check the bundled factorizations (fast, deterministic)"),
        )
}
