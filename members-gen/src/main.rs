use clap::{Arg, ArgAction, Command};
use members_gen::config::{
    DEFAULT_MAX_ARITY, DEFAULT_REFLECT_PATH, DEFAULT_TIE_OUT, DEFAULT_VISITOR_PATH,
    DEFAULT_VISIT_OUT,
};
use members_gen::{GenError, GeneratorConfig, Layout, driver, trace};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

fn cli() -> Command {
    Command::new("members-gen")
        .about("Generate per-arity visit and tie tables for aggregate decomposition")
        .arg(
            Arg::new("max-arity")
                .short('n')
                .long("max-arity")
                .help("Largest member count covered by the tables [default: 64]")
                .value_name("N")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("visit-out")
                .long("visit-out")
                .help("Output file for the visit table")
                .value_name("FILE")
                .default_value(DEFAULT_VISIT_OUT),
        )
        .arg(
            Arg::new("tie-out")
                .long("tie-out")
                .help("Output file for the tie table")
                .value_name("FILE")
                .default_value(DEFAULT_TIE_OUT),
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .help("Write both tables into a single file")
                .value_name("FILE")
                .conflicts_with_all(["visit-out", "tie-out"]),
        )
        .arg(
            Arg::new("reflect-path")
                .long("reflect-path")
                .help("Module path of the Decompose trait, as seen from the artifact")
                .value_name("PATH")
                .default_value(DEFAULT_REFLECT_PATH),
        )
        .arg(
            Arg::new("visitor-path")
                .long("visitor-path")
                .help("Module path of the visit artifact, as seen from the tie artifact")
                .value_name("PATH")
                .default_value(DEFAULT_VISITOR_PATH),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Compare regenerated output with the files on disk; write nothing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the artifacts instead of writing them")
                .action(ArgAction::SetTrue)
                .conflicts_with("check"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log each table as it is assembled and validated")
                .action(ArgAction::SetTrue),
        )
}

fn config_from(matches: &clap::ArgMatches) -> Result<GeneratorConfig, GenError> {
    let max_arity = *matches
        .get_one::<i64>("max-arity")
        .unwrap_or(&(DEFAULT_MAX_ARITY as i64));

    let layout = match matches.get_one::<String>("out") {
        Some(out) => Layout::Combined(PathBuf::from(out)),
        None => Layout::Separate {
            visit: path_arg(matches, "visit-out", DEFAULT_VISIT_OUT),
            tie: path_arg(matches, "tie-out", DEFAULT_TIE_OUT),
        },
    };

    GeneratorConfig::new(max_arity)?
        .with_reflect_path(string_arg(matches, "reflect-path", DEFAULT_REFLECT_PATH))?
        .with_visitor_path(string_arg(matches, "visitor-path", DEFAULT_VISITOR_PATH))
        .map(|config| config.with_layout(layout))
}

fn string_arg<'a>(matches: &'a clap::ArgMatches, id: &str, default: &'a str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or(default)
}

fn path_arg(matches: &clap::ArgMatches, id: &str, default: &str) -> PathBuf {
    PathBuf::from(string_arg(matches, id, default))
}

fn run(matches: &clap::ArgMatches) -> Result<(), GenError> {
    let config = config_from(matches)?;
    info!(n = config.n(), "generating member tables");

    let artifacts = driver::generate(&config)?;

    if matches.get_flag("check") {
        driver::check_artifacts(&artifacts)?;
        info!(count = artifacts.len(), "artifacts up to date");
    } else if matches.get_flag("stdout") {
        for artifact in &artifacts {
            print!("{}", artifact.contents);
        }
    } else {
        driver::write_artifacts(&artifacts)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    trace::init_logging(matches.get_flag("verbose"));

    let start = Instant::now();
    let result = run(&matches);
    info!(ms = start.elapsed().as_millis() as u64, "done");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
