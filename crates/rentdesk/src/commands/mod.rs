//! Command dispatch: bridges CLI args -> core Session calls -> output.

pub mod calendar;
pub mod config_cmd;
pub mod kyc;
pub mod requests;
mod review;
pub mod staff;
pub mod stats;
pub mod util;
pub mod watch;

use rentdesk_core::SessionConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: SessionConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Requests(args) => requests::handle(config, args, global).await,
        Command::Kyc(args) => kyc::handle(config, args, global).await,
        Command::Calendar(args) => calendar::handle(config, args, global).await,
        Command::Stats => stats::handle(config, global).await,
        Command::Staff(args) => staff::handle(config, args, global).await,
        Command::Watch(args) => watch::handle(config, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
