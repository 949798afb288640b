//! Replay a script through a drawing session.
//!
//! Canvas events are applied in order on the current task. Submissions are
//! captured synchronously and then spawned, so later events keep flowing
//! while a request is outstanding.

use std::time::Duration;

use anyhow::Context;
use ink_client::{RecognitionClient, SubmitResult};
use ink_core::{DrawingSession, ProcessReport, RecognitionResult, SessionConfig, VariableContext};
use tokio::sync::mpsc;

use crate::script::{Control, ScriptStep};
use crate::ReplayConfig;

/// What happened to one `submit` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The endpoint answered with these records.
    Completed(Vec<RecognitionResult>),
    /// The request failed.
    Failed(String),
    /// The submission was refused before sending.
    Rejected(String),
}

/// Summary of a replay.
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    /// Aggregated event processing counts.
    pub events: ProcessReport,
    /// Submission outcomes in completion order.
    pub submissions: Vec<SubmissionOutcome>,
    /// Variables after all assignments were applied.
    pub variables: VariableContext,
}

/// Run `steps` against a fresh session sized from `config`.
///
/// # Errors
///
/// Returns an error if the session or client cannot be created, or if the
/// final PNG cannot be written.
pub async fn run(config: &ReplayConfig, steps: Vec<ScriptStep>) -> anyhow::Result<ReplaySummary> {
    let mut session =
        DrawingSession::with_viewport(SessionConfig::default(), config.width, config.height)
            .context("failed to create drawing surface")?;
    *session.context_mut() = config.variables.clone();

    let client = RecognitionClient::new(&config.client).context("failed to create client")?;
    tracing::info!("Replaying {} steps against {}", steps.len(), client.endpoint());

    let (tx, mut rx) = mpsc::unbounded_channel::<SubmitResult<Vec<RecognitionResult>>>();
    let mut outstanding = 0usize;
    let mut summary = ReplaySummary::default();

    for step in steps {
        while let Ok(result) = rx.try_recv() {
            outstanding -= 1;
            record(&mut session, &mut summary, result);
        }

        match step {
            ScriptStep::Canvas(event) => {
                let report = session.dispatch(event);
                accumulate(&mut summary.events, report);
            }
            ScriptStep::Control(Control::Submit) => match client.begin_from_session(&mut session) {
                Ok(request) => {
                    outstanding += 1;
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if tx.send(request.await).is_err() {
                            tracing::warn!("Replay finished before submission result arrived");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!("Submit skipped: {e}");
                    summary.submissions.push(SubmissionOutcome::Rejected(e.to_string()));
                }
            },
            ScriptStep::Control(Control::Wait { ms }) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        }

        tokio::task::yield_now().await;
    }

    while outstanding > 0 {
        let Some(result) = rx.recv().await else {
            break;
        };
        outstanding -= 1;
        record(&mut session, &mut summary, result);
    }

    if let Some(path) = &config.output {
        let snapshot = session.surface().snapshot()?;
        std::fs::write(path, snapshot.png_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote final canvas to {}", path.display());
    }

    summary.variables = session.context().clone();
    Ok(summary)
}

fn record(
    session: &mut DrawingSession,
    summary: &mut ReplaySummary,
    result: SubmitResult<Vec<RecognitionResult>>,
) {
    match result {
        Ok(results) => {
            let assigned = session.context_mut().apply(&results);
            tracing::debug!("{} result(s), {assigned} assignment(s)", results.len());
            summary.submissions.push(SubmissionOutcome::Completed(results));
        }
        Err(e) => {
            tracing::warn!("Submission failed: {e}");
            summary.submissions.push(SubmissionOutcome::Failed(e.to_string()));
        }
    }
}

fn accumulate(total: &mut ProcessReport, report: ProcessReport) {
    total.processed += report.processed;
    total.segments += report.segments;
    total.resets += report.resets;
    total.failed += report.failed;
}
