//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;
use vcair_api::types::ServiceConfiguration;
use vcair_api::{Task, xml};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to prompt on, destructive actions need `--yes`.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse an `<EdgeGatewayServiceConfiguration>` file for
/// `--from-file` flags.
pub fn read_services_file(path: &Path) -> Result<ServiceConfiguration, CliError> {
    let contents = std::fs::read_to_string(path)?;
    xml::decode(&contents).map_err(|source| CliError::InvalidXml {
        path: path.display().to_string(),
        source,
    })
}

// ── Task output ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct TaskView {
    href: String,
    status: String,
    operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print the task returned by a submission (or re-read by `task show`).
pub fn print_task(task: &Task, global: &GlobalOpts) -> Result<(), CliError> {
    let doc = task.document();
    let view = TaskView {
        href: doc.href.clone(),
        status: task.status().to_string(),
        operation: if doc.operation.is_empty() {
            doc.operation_name.clone()
        } else {
            doc.operation.clone()
        },
        progress: doc.progress,
        error: doc.error.as_ref().map(|e| e.message.clone()),
    };
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &view,
        |v| {
            let mut lines = vec![
                format!("Task:      {}", v.href),
                format!("Status:    {}", output::paint_status(task.status(), color)),
                format!("Operation: {}", v.operation),
            ];
            if let Some(p) = v.progress {
                lines.push(format!("Progress:  {p}%"));
            }
            if let Some(ref e) = v.error {
                lines.push(format!("Error:     {e}"));
            }
            lines.join("\n")
        },
        |v| v.href.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Empty cells render as `-`.
pub fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".into()
    } else {
        value.to_owned()
    }
}
