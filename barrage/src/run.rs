use anyhow::Context as _;

use barrage_core::{RunConfig, Suite};

use crate::cli::RunArgs;
use crate::exit_codes::ExitCode;
use crate::output;
use crate::workloads;

pub(crate) fn run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let workers = match args.workers {
        Some(workers) => workers,
        None => default_workers()?,
    };

    let names: Vec<String> = if args.workloads.is_empty() {
        workloads::BUILTIN_NAMES
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    } else {
        args.workloads.clone()
    };

    for name in &names {
        if !workloads::BUILTIN_NAMES.contains(&name.as_str()) {
            eprintln!(
                "unknown workload `{name}` (available: {})",
                workloads::BUILTIN_NAMES.join(", ")
            );
            return Ok(ExitCode::InvalidInput);
        }
    }

    let mut cfg = RunConfig::new(workers);
    cfg.continue_on_error = args.continue_on_error;

    tracing::debug!(workers, times = args.times, loops = args.loops, "starting suite");

    let mut failed_runs = 0;
    for pass in 1..=args.loops {
        if args.loops > 1 {
            println!("--- pass {pass}/{} ---", args.loops);
        }

        // A fresh suite per pass: workloads are consumed by the engine.
        let mut suite = Suite::new();
        for name in &names {
            let workload = workloads::builtin(name, args.times, args.payload)
                .with_context(|| format!("unknown workload `{name}`"))?;
            suite.add(workload);
        }

        let report = suite.run_all(&cfg)?;
        output::print_report(&report);
        failed_runs += report.failed_runs();
    }

    if failed_runs > 0 {
        eprintln!("{failed_runs} workload run(s) failed");
        return Ok(ExitCode::WorkloadsFailed);
    }

    Ok(ExitCode::Success)
}

pub(crate) fn list() {
    for name in workloads::BUILTIN_NAMES {
        println!("{name}");
    }
}

fn default_workers() -> anyhow::Result<u64> {
    let parallelism = std::thread::available_parallelism()
        .context("failed to determine available parallelism; pass --workers explicitly")?;
    Ok(parallelism.get() as u64)
}
