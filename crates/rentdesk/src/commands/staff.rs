//! Staff directory and activity report handlers.

use tabled::Tabled;

use rentdesk_core::{Capability, Operator, OperatorActivity, SessionConfig};

use crate::cli::{GlobalOpts, StaffArgs, StaffCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct OperatorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Permissions")]
    permissions: String,
}

impl From<&Operator> for OperatorRow {
    fn from(o: &Operator) -> Self {
        let permissions = if o.permissions.grants_all() {
            "all".to_owned()
        } else {
            o.permissions
                .sections()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            id: o.id.to_string(),
            username: o.username.clone(),
            name: o.full_name.clone(),
            role: o.role.to_string(),
            permissions,
        }
    }
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Today")]
    today: u64,
    #[tabled(rename = "Rentals total")]
    rentals: u64,
    #[tabled(rename = "KYC total")]
    kyc: u64,
}

impl From<&OperatorActivity> for ActivityRow {
    fn from(a: &OperatorActivity) -> Self {
        Self {
            name: a.full_name.clone(),
            role: a.role.to_string(),
            today: a.today_actions,
            rentals: a.total_requests,
            kyc: a.total_kyc,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: SessionConfig,
    args: StaffArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let output_format = global.output.clone();
    let quiet = global.quiet;

    match args.command {
        StaffCommand::List => {
            util::with_session(config, |session| async move {
                util::require_section(&session, Capability::Settings)?;

                let staff = session.staff().await.map_err(CliError::from)?;
                let out = output::render_list(
                    &output_format,
                    &staff,
                    |o| OperatorRow::from(o),
                    |o| o.id.to_string(),
                );
                output::print_output(&out, quiet);
                Ok(())
            })
            .await
        }

        StaffCommand::Report => {
            util::with_session(config, |session| async move {
                util::require_section(&session, Capability::Settings)?;

                let report = session.activity_report().await.map_err(CliError::from)?;
                let out = output::render_list(
                    &output_format,
                    &report,
                    |a| ActivityRow::from(a),
                    |a| a.id.to_string(),
                );
                output::print_output(&out, quiet);
                Ok(())
            })
            .await
        }
    }
}
