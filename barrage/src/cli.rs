use clap::{Args, Parser, Subcommand};

/// Parse a size literal like `512`, `4KB`, `1.5MB`, `2GB` into bytes.
/// Units are binary (KB = 1024) and case-insensitive.
pub(crate) fn parse_size(input: &str) -> Result<u64, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("size cannot be empty (expected e.g. 512, 4KB, 1MB)".to_string());
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_digit() || *ch == '.'))
        .map_or(s.len(), |(idx, _)| idx);

    if number_end == 0 {
        return Err(format!("invalid size '{s}' (expected e.g. 512, 4KB, 1MB)"));
    }

    let (number_str, unit_str) = s.split_at(number_end);
    let value: f64 = number_str
        .parse()
        .map_err(|_| format!("invalid size '{s}' (expected e.g. 512, 4KB, 1MB)"))?;

    let scale = match unit_str.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "KB" => 1024.0,
        "MB" => 1024.0 * 1024.0,
        "GB" => 1024.0 * 1024.0 * 1024.0,
        unit => {
            return Err(format!(
                "unsupported size unit '{unit}' (expected B, KB, MB, or GB)"
            ));
        }
    };

    Ok((value * scale).floor() as u64)
}

#[derive(Debug, Parser)]
#[command(
    name = "barrage",
    author,
    version,
    about = "Throughput benchmark harness",
    long_about = "barrage runs named workloads repeatedly across a pool of worker threads, synchronizes their start so elapsed time covers only work execution, and reports aggregate throughput (bytes/sec in both directions plus operations/sec).\n\nThe engine treats each workload unit as an opaque operation; the built-in workloads are synthetic units useful for calibrating the harness itself.",
    after_help = "Examples:\n  barrage run\n  barrage run noop sleep --times 50000 --workers 8\n  barrage run spin --payload 4KB --loop 3\n  barrage list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one or more built-in workloads
    #[command(
        long_about = "Run the selected built-in workloads sequentially, each across the full worker pool. With no names given, every built-in workload runs."
    )]
    Run(RunArgs),

    /// List the built-in workloads
    List,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Workload names to run (default: all built-ins)
    pub workloads: Vec<String>,

    /// Invocations per workload
    #[arg(long, default_value_t = 10_000)]
    pub times: u64,

    /// Worker threads (default: available parallelism)
    #[arg(long)]
    pub workers: Option<u64>,

    /// Run the whole suite this many times
    #[arg(long = "loop", value_name = "N", default_value_t = 1)]
    pub loops: u64,

    /// Request payload size for the built-in units (e.g. 512, 4KB, 1MB)
    #[arg(long, value_parser = parse_size, default_value = "1KB")]
    pub payload: u64,

    /// Record a failed workload run and keep going instead of aborting
    #[arg(long)]
    pub continue_on_error: bool,
}
