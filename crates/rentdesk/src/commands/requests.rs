//! Rental request command handlers.

use rentdesk_core::{ReviewCategory, ReviewOutcome, SessionConfig};

use crate::cli::{GlobalOpts, RequestsArgs, RequestsCommand};
use crate::error::CliError;

use super::review;

pub async fn handle(
    config: SessionConfig,
    args: RequestsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let category = ReviewCategory::Rental;
    match args.command {
        RequestsCommand::List(list) => review::list(config, category, &list, global).await,
        RequestsCommand::Approve(act) => {
            review::act(config, category, ReviewOutcome::Approve, act, global).await
        }
        RequestsCommand::Reject(act) => {
            review::act(config, category, ReviewOutcome::Reject, act, global).await
        }
    }
}
