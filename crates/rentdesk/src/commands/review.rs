//! Shared handler logic for the two review queues.
//!
//! Rental and KYC screens are the same workflow over different categories;
//! everything except the category tag lives here once.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;

use rentdesk_core::{
    RequestId, RequestStatus, ReviewCategory, ReviewOutcome, ReviewableRequest, SessionConfig,
};

use crate::cli::{GlobalOpts, ReviewActionArgs, ReviewListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl From<&Arc<ReviewableRequest>> for RequestRow {
    fn from(r: &Arc<ReviewableRequest>) -> Self {
        Self {
            id: r.id.to_string(),
            subject: r.subject.clone(),
            detail: r.detail.clone().unwrap_or_default(),
            created: r.created_at.format("%Y-%m-%d %H:%M").to_string(),
            status: r.status.to_string(),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

// ── List ────────────────────────────────────────────────────────────

pub(crate) async fn list(
    config: SessionConfig,
    category: ReviewCategory,
    args: &ReviewListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let include_terminal = args.all;
    let output_format = global.output.clone();
    let quiet = global.quiet;

    util::with_session(config, |session| async move {
        util::require_section(&session, category.required_capability())?;

        // Snapshot is already in display order: pending first, newest first.
        let snapshot = session.requests(category);
        let visible: Vec<Arc<ReviewableRequest>> = snapshot
            .iter()
            .filter(|r| include_terminal || r.status == RequestStatus::Pending)
            .cloned()
            .collect();

        let out = output::render_list(
            &output_format,
            &visible,
            |r| RequestRow::from(r),
            |r| r.id.to_string(),
        );
        output::print_output(&out, quiet);
        Ok(())
    })
    .await
}

// ── Approve / Reject ────────────────────────────────────────────────

pub(crate) async fn act(
    config: SessionConfig,
    category: ReviewCategory,
    outcome: ReviewOutcome,
    args: ReviewActionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Rejection notifies the customer; make the operator mean it.
    if outcome == ReviewOutcome::Reject
        && !util::confirm(
            &format!("Reject {category} request '{}'?", args.id),
            global.yes,
        )?
    {
        return Ok(());
    }

    let use_color = output::should_color(&global.color);
    let quiet = global.quiet;

    util::with_session(config, |session| async move {
        util::require_section(&session, category.required_capability())?;

        let id = RequestId::new(args.id);
        let updated = session
            .review(category, &id, outcome, args.note)
            .await
            .map_err(CliError::from)?;

        if !quiet {
            let verdict = updated.status.to_string();
            if use_color {
                match updated.status {
                    RequestStatus::Approved => {
                        eprintln!("{} {}", "Request".bold(), verdict.green());
                    }
                    _ => eprintln!("{} {}", "Request".bold(), verdict.red()),
                }
            } else {
                eprintln!("Request {verdict}");
            }
        }
        Ok(())
    })
    .await
}
