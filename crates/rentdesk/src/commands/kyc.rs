//! Identity-verification command handlers.

use rentdesk_core::{ReviewCategory, ReviewOutcome, SessionConfig};

use crate::cli::{GlobalOpts, KycArgs, KycCommand};
use crate::error::CliError;

use super::review;

pub async fn handle(
    config: SessionConfig,
    args: KycArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let category = ReviewCategory::Kyc;
    match args.command {
        KycCommand::List(list) => review::list(config, category, &list, global).await,
        KycCommand::Approve(act) => {
            review::act(config, category, ReviewOutcome::Approve, act, global).await
        }
        KycCommand::Reject(act) => {
            review::act(config, category, ReviewOutcome::Reject, act, global).await
        }
    }
}
