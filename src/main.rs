//! Purpose: `linkprobe` CLI entry point; runs the c-ares and zlib sanity probes.
//! Role: Binary crate root; parses args, runs probes, emits failures or a JSON summary on stdout.
//! Invariants: Text mode is silent on success and prints one diagnostic line per failed run.
//! Invariants: Exit code is 0 when every run passed, 1 when any probe failed, 2 on usage errors.
//! Invariants: Non-probe errors go to stderr (text or JSON by `--format`).
use std::error::Error as StdError;
use std::io::{self, Write};

use clap::{Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};

mod report;

use linkprobe::core::error::{Error, ErrorKind, to_exit_code};
use linkprobe::core::probe::{ProbeKind, ProbeReport, run_probe};
use linkprobe::logging::init_tracing;
use report::{failure_lines, report_time_now, summary_json};

/// Upper bound for `--repeat`; each run keeps one report in memory.
const MAX_REPEAT: u32 = 10_000;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, format)) => {
            emit_error(&err, format);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, OutputFormat)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        OutputFormat::Text,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage).with_message(clap_error_summary(&err)),
                    OutputFormat::Text,
                ));
            }
        },
    };

    let format = cli.format;
    let kinds = cli.command.probe_kinds().map_err(|err| (err, format))?;
    let reports = run_probes(&kinds, cli.repeat);
    emit_reports(&reports, format).map_err(|err| (err, format))?;

    match reports.iter().find(|report| !report.ok) {
        Some(report) => Ok(RunOutcome::with_code(report.exit_code())),
        None => Ok(RunOutcome::ok()),
    }
}

#[derive(Parser)]
#[command(
    name = "linkprobe",
    version,
    about = "Check that c-ares and zlib are installed and linkable",
    long_about = None,
    after_help = r#"EXAMPLES
  $ linkprobe all                      # silent, exit 0 when both libraries work
  $ linkprobe zlib
  $ linkprobe --format json all
  $ linkprobe --repeat 5 run c-ares zlib

NOTES
  - Each probe runs one init -> check -> cleanup sequence (c-ares: ares_library_init,
    zlib: deflateInit at level 9)
  - --repeat accepts 1 to 10000 runs per probe
  - Exit codes: 0 ok, 1 a probe failed, 2 usage error
  - Set RUST_LOG=debug to trace the library calls on stderr"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format: text (failures only) or json (full report)"
    )]
    format: OutputFormat,
    #[arg(
        long,
        global = true,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_REPEAT)),
        help = "Run each probe N times (1-10000); any failed run fails the command"
    )]
    repeat: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    #[command(
        visible_alias = "c-ares",
        about = "Initialize and clean up the c-ares resolver library"
    )]
    Resolver,
    #[command(
        visible_alias = "zlib",
        about = "Open and close a level-9 zlib deflate stream"
    )]
    Compression,
    #[command(about = "Run every probe")]
    All,
    #[command(arg_required_else_help = true, about = "Run the named probes in order")]
    Run {
        #[arg(required = true, help = "Probe names: c-ares, zlib")]
        probes: Vec<String>,
    },
}

impl Command {
    fn probe_kinds(&self) -> Result<Vec<ProbeKind>, Error> {
        match self {
            Command::Resolver => Ok(vec![ProbeKind::Resolver]),
            Command::Compression => Ok(vec![ProbeKind::Compression]),
            Command::All => Ok(ProbeKind::ALL.to_vec()),
            Command::Run { probes } => probes.iter().map(|name| ProbeKind::parse(name)).collect(),
        }
    }
}

fn run_probes(kinds: &[ProbeKind], repeat: u32) -> Vec<ProbeReport> {
    let mut reports = Vec::new();
    for &kind in kinds {
        for _ in 0..repeat {
            reports.push(run_probe(kind));
        }
    }
    reports
}

fn emit_reports(reports: &[ProbeReport], format: OutputFormat) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Text => failure_lines(reports)
            .iter()
            .try_for_each(|line| writeln!(out, "{line}")),
        OutputFormat::Json => {
            let value = summary_json(reports, report_time_now().as_deref());
            writeln!(out, "{value}")
        }
    };
    written.and_then(|()| out.flush()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write report")
            .with_source(err)
    })
}

fn emit_error(err: &Error, format: OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("{}", error_text(err)),
        OutputFormat::Json => {
            let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
                "{\"error\":{\"message\":\"json encode failed\"}}".to_string()
            });
            eprintln!("{json}");
        }
    }
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::InitFailed => "library initialization failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(probe) = err.probe() {
        inner.insert("probe".to_string(), json!(probe));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if err.kind() == ErrorKind::Usage {
        lines.push("hint: Try `linkprobe --help`.".to_string());
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
