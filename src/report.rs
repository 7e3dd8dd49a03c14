//! Text renderings of an [`Aggregate`].

use crate::aggregate::{Aggregate, FieldProgress, TaskBreakdown};
use crate::month::MonthKey;
use crate::progress::TaskField;
use std::fmt::Write;

/// Default heading for share messages.
pub const DEFAULT_HEADING: &str = "Tasks report for";

/// Builds the month summary message meant to be pasted into a chat.
///
/// Clients without any quota are skipped; within a client, only fields with a
/// quota are listed.
pub fn share_message(month: &MonthKey, aggregate: &Aggregate, heading: &str) -> String {
    let mut message = format!("*{} {}*\n\n", heading, month.display_name());

    for client in aggregate.per_client.iter().filter(|c| c.has_tasks()) {
        let _ = writeln!(message, "*{}*:", client.name);
        for (field, progress) in client.tasks.tracked() {
            let _ = writeln!(message, "- {}: {}", field.label(), share_amount(field, progress));
        }
        message.push('\n');
    }

    message
}

fn share_amount(field: TaskField, progress: FieldProgress) -> String {
    if field.is_currency() {
        format!("${} / ${}", progress.completed, progress.total)
    } else {
        format!("{}/{}", progress.completed, progress.total)
    }
}

/// Terminal overview: one block per client with tasks, then the fleet block.
pub fn overview(month: &MonthKey, aggregate: &Aggregate, editable: bool) -> String {
    let mut out = String::new();
    let state = if editable { "editable" } else { "read-only" };
    let _ = writeln!(out, "{} ({}, {})", month.display_name(), month, state);
    out.push('\n');

    let mut any = false;
    for client in aggregate.per_client.iter().filter(|c| c.has_tasks()) {
        any = true;
        let _ = writeln!(out, "[{}] {}", client.client_id, client.name);
        write_breakdown(&mut out, &client.tasks);
        out.push('\n');
    }
    if !any {
        out.push_str("No client has tasks assigned.\n\n");
    }

    out.push_str("All clients\n");
    write_breakdown(&mut out, &aggregate.fleet);
    out
}

fn write_breakdown(out: &mut String, tasks: &TaskBreakdown) {
    for (field, progress) in tasks.tracked() {
        let amount = if field.is_currency() {
            format!("${} / ${}", progress.completed, progress.total)
        } else {
            format!("{} / {}", progress.completed, progress.total)
        };
        let _ = writeln!(
            out,
            "  {:<12} {:>13}  {} {:>3.0}%",
            field.label(),
            amount,
            bar(progress.percentage()),
            progress.percentage()
        );
    }
}

const BAR_WIDTH: usize = 20;

/// Fixed-width progress bar; values over 100% render as a full bar.
fn bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
