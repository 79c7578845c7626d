//! Calendar override command handlers.

use chrono::Utc;

use rentdesk_core::{CalendarOverride, Capability, OverrideRule, SessionConfig};

use crate::cli::{CalendarArgs, CalendarCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    config: SessionConfig,
    args: CalendarArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CalendarCommand::Show { date } => {
            let date = match date {
                Some(raw) => util::parse_date(&raw)?,
                None => Utc::now().date_naive(),
            };
            let output_format = global.output.clone();
            let quiet = global.quiet;

            util::with_session(config, |session| async move {
                util::require_section(&session, Capability::Settings)?;

                match session.override_for(date) {
                    Some(record) => {
                        let out = output::render_single(
                            &output_format,
                            record.as_ref(),
                            describe,
                            |o| o.date.to_string(),
                        );
                        output::print_output(&out, quiet);
                    }
                    None => {
                        if !quiet {
                            eprintln!("{date}: no override (standard schedule)");
                        }
                    }
                }
                Ok(())
            })
            .await
        }

        CalendarCommand::Set {
            date,
            discount,
            blackout,
            description,
        } => {
            let date = util::parse_date(&date)?;

            // Validation happens before any network traffic.
            let record = match (discount, blackout) {
                (Some(percent), false) => {
                    CalendarOverride::discount(date, percent, description)
                        .map_err(CliError::from)?
                }
                (None, true) => CalendarOverride::blackout(date, description),
                _ => {
                    return Err(CliError::Validation {
                        field: "type".into(),
                        reason: "pass exactly one of --discount <PERCENT> or --blackout".into(),
                    });
                }
            };

            let quiet = global.quiet;
            util::with_session(config, |session| async move {
                util::require_section(&session, Capability::Settings)?;
                let summary = describe(&record);
                session.set_override(record).await.map_err(CliError::from)?;
                if !quiet {
                    eprintln!("Override saved: {summary}");
                }
                Ok(())
            })
            .await
        }

        CalendarCommand::Clear { date } => {
            let date = util::parse_date(&date)?;
            let quiet = global.quiet;

            util::with_session(config, |session| async move {
                util::require_section(&session, Capability::Settings)?;
                session.clear_override(date).await.map_err(CliError::from)?;
                if !quiet {
                    eprintln!("Override cleared for {date}");
                }
                Ok(())
            })
            .await
        }
    }
}

fn describe(record: &CalendarOverride) -> String {
    let rule = match record.rule {
        OverrideRule::Discount { percent } => format!("{percent}% discount"),
        OverrideRule::Blackout => "blackout".into(),
    };
    match &record.description {
        Some(text) => format!("{}: {rule} ({text})", record.date),
        None => format!("{}: {rule}", record.date),
    }
}
