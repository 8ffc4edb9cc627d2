use barrage_core::{SuiteReport, render_run_line, render_totals_line};

/// Print one line per workload run plus the suite totals. Failed runs go to
/// stderr so report lines stay machine-greppable on stdout.
pub(crate) fn print_report(report: &SuiteReport) {
    for run in &report.runs {
        match &run.outcome {
            Ok(result) => println!("{}", render_run_line(&run.display_name, result)),
            Err(err) => eprintln!("[{}]: run failed: {err}", run.display_name),
        }
    }

    println!("{}", render_totals_line(&report.totals));
}
