//! Live pending-work watcher.
//!
//! Runs a full session with the polling timers enabled and prints a line
//! (plus the terminal bell, unless suppressed) every time the pending
//! total strictly increases. Ctrl-C tears the session down cleanly --
//! no timer survives the watcher.

use owo_colors::OwoColorize;

use rentdesk_core::{
    PendingAlert, RequestStatus, ReviewCategory, Session, SessionConfig, SessionState,
};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    mut config: SessionConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    config.pending_interval_secs = args.interval;

    let use_color = output::should_color(&global.color);
    let session = Session::new(config);
    session.login().await.map_err(CliError::from)?;

    let mut alerts = session.alerts();
    let mut state = session.state();

    if !global.quiet {
        // The login fetch already populated the visible queues; the poll
        // task baselines on them at its first tick.
        let pending: usize = ReviewCategory::ALL
            .iter()
            .map(|&category| {
                session
                    .requests(category)
                    .iter()
                    .filter(|r| r.status == RequestStatus::Pending)
                    .count()
            })
            .sum();
        eprintln!(
            "Watching for new pending work every {}s ({pending} pending now). Ctrl-C to stop.",
            args.interval
        );
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = state.changed() => {
                if changed.is_err() || *state.borrow() == SessionState::Ended {
                    break;
                }
            }

            alert = alerts.recv() => {
                match alert {
                    Ok(alert) => print_alert(&alert, use_color, args.no_bell),
                    // Lagged just means we missed intermediate alerts; the
                    // next one still carries the current totals.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    session.close().await;
    if !global.quiet {
        eprintln!("Watcher stopped.");
    }
    Ok(())
}

fn print_alert(alert: &PendingAlert, use_color: bool, no_bell: bool) {
    let breakdown = alert
        .per_category
        .iter()
        .map(|(category, count)| format!("{category}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");

    // The bell is the console's audible "new work" cue.
    let bell = if no_bell { "" } else { "\u{7}" };
    let delta = alert.total - alert.previous_total;

    if use_color {
        println!(
            "{bell}{} +{delta} pending ({breakdown}) -- total {}",
            "NEW".bold().yellow(),
            alert.total
        );
    } else {
        println!("{bell}NEW +{delta} pending ({breakdown}) -- total {}", alert.total);
    }
}
