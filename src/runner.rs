use tracing::{debug, info};

use crate::config::Config;
use crate::exec::{self, FlowOutput};
use crate::report;
use crate::resolve;
use crate::sink::ReportSink;

/// How a successful run ended
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Flow reported no errors, nothing was sent
    Clean,
    /// Annotations were handed to the sink
    Reported(usize),
}

/// Resolve flow, run it, and hand any errors to `sink`
///
/// Every fatal condition is returned; callers decide how to exit.
pub async fn run(config: &Config, sink: &dyn ReportSink) -> anyhow::Result<Outcome> {
    let flow_bin = resolve::resolve_flow_bin(config.flow_bin.as_deref())?;
    info!("Running {}", flow_bin);

    let output = exec::run_flow(&flow_bin, config.working_directory.as_deref()).await?;
    report_output(&output, config.subtitle.as_deref(), sink).await
}

/// Parse captured flow output and report it
pub async fn report_output(
    output: &FlowOutput,
    subtitle: Option<&str>,
    sink: &dyn ReportSink,
) -> anyhow::Result<Outcome> {
    debug!("Flow exited with {}", output.status);
    let report = match report::parse_report(&output.stdout) {
        Ok(report) => report,
        Err(e) => {
            eprintln!(
                "{}",
                report::format_parse_failure(&e, &output.stdout, &output.stderr)
            );
            return Err(e.into());
        }
    };

    if report.errors.is_empty() {
        println!("No errors");
        return Ok(Outcome::Clean);
    }

    let annotations = report::annotations(&report);
    let title = report::title(subtitle);
    debug!(
        "Flow reported {} errors, {} annotations",
        report.errors.len(),
        annotations.len()
    );
    sink.send(&title, &annotations).await?;
    info!("Reported {} annotations under '{}'", annotations.len(), title);
    Ok(Outcome::Reported(annotations.len()))
}
