use std::fmt::Write as _;

use crate::result::RunResult;

const MIB: f64 = 1048576.0;

/// Render one workload's report line. Pure function of the display name and
/// the reduced result; throughput figures are derived here, never stored.
pub fn render_run_line(display_name: &str, result: &RunResult) -> String {
    let mut out = format!(
        "[{display_name}]: OUT={:.3}MBps IN={:.3}MBps {:>8.3}Tps",
        result.request_bps() / MIB,
        result.response_bps() / MIB,
        result.ops_per_sec(),
    );

    if !result.failures.is_empty() {
        let failed: Vec<String> = result
            .failures
            .iter()
            .map(|(status, count)| format!("{status:#x}={count}"))
            .collect();
        write!(&mut out, " failed[{}]", failed.join(" ")).ok();
    }

    out
}

/// Summary line over a whole suite run.
pub fn render_totals_line(totals: &RunResult) -> String {
    render_run_line("TOTAL", totals)
}
