use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, warn};

use gosig::candidate::{self, Candidate, CandidateList, InputFormat};
use gosig::models::{MetaInfo, OutputEnvelope};
use gosig::snippet::SnippetMode;
use gosig::suggest::{self, Matcher, UpgradeOptions};
use gosig::{cli, file_reader, output};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let action = match cli::parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match action {
        cli::CliAction::Help => {
            cli::print_help();
            0
        }
        cli::CliAction::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        cli::CliAction::Run(args) => {
            init_logging(args.verbose);
            execute(args)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn execute(args: cli::CliArgs) -> i32 {
    let mode = SnippetMode::from_setting(&args.mode);

    let filter = match args.filter.as_deref().map(|p| Matcher::build(p, args.is_regex)) {
        Some(Ok(m)) => Some(m),
        Some(Err(e)) => return emit(&args, &OutputEnvelope::error(e), 1),
        None => None,
    };

    let cancelled = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(&cancelled);

    if let Some(secs) = args.timeout {
        let cancelled = cancelled.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_secs(secs));
            cancelled.store(true, Ordering::Relaxed);
        });
    }

    let start = Instant::now();

    let list = match load_candidates(&args) {
        Ok(list) => list,
        Err(e) => {
            error!("{}", e);
            return emit(&args, &OutputEnvelope::error(e.to_string()), 1);
        }
    };

    let opts = UpgradeOptions {
        mode,
        prefix: &args.prefix,
        filter: filter.as_ref(),
    };
    let suggestions = suggest::upgrade_all(&list.candidates, &opts, &cancelled);
    let elapsed = start.elapsed().as_millis() as u64;
    let timed_out = cancelled.load(Ordering::Relaxed);
    debug!(
        "{} of {} candidates kept in {}ms",
        suggestions.len(),
        list.candidates.len(),
        elapsed
    );

    let reports_prefix = args.single.is_none() && args.input_format == InputFormat::Json;
    let envelope = OutputEnvelope {
        meta: Some(MetaInfo {
            elapsed_ms: elapsed,
            timeout: timed_out,
            mode: mode.to_string(),
            candidates: list.candidates.len(),
            suggestions: suggestions.len(),
            prefix_len: reports_prefix.then_some(list.prefix_len),
        }),
        suggestions: Some(suggestions),
        error: if timed_out { Some("Operation timed out — partial results may be incomplete".into()) } else { None },
    };

    emit(&args, &envelope, if timed_out { 2 } else { 0 })
}

fn load_candidates(args: &cli::CliArgs) -> Result<CandidateList, candidate::InputError> {
    if let Some((ref name, ref type_text)) = args.single {
        return Ok(CandidateList {
            prefix_len: 0,
            candidates: vec![Candidate::new("func", name, type_text)],
        });
    }
    let text = file_reader::read_input(&args.input)?;
    candidate::parse_candidates(&text, args.input_format)
}

fn emit(args: &cli::CliArgs, envelope: &OutputEnvelope, code: i32) -> i32 {
    match args.out {
        Some(ref path) => match output::write_output_to(envelope, args.output_format, path) {
            Ok(()) => code,
            Err(e) => {
                eprintln!("Failed to write {}: {}", path, e);
                1
            }
        },
        None => {
            output::write_output(envelope, args.output_format);
            code
        }
    }
}

#[cfg(unix)]
fn install_interrupt_handler(cancelled: &Arc<AtomicBool>) {
    if let Err(e) = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(cancelled)) {
        warn!("could not install SIGINT handler: {}", e);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler(_cancelled: &Arc<AtomicBool>) {}
