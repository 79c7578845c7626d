//! Dashboard metrics command handler.

use rentdesk_core::{DashboardMetrics, Session, SessionConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(config: SessionConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let output_format = global.output.clone();
    let quiet = global.quiet;

    // The dashboard is visible to every operator; no section gate here.
    Session::oneshot(config, |session| async move {
        session.refresh_metrics().await?;
        let Some(metrics) = session.metrics() else {
            return Ok(());
        };

        let out = output::render_single(
            &output_format,
            metrics.as_ref(),
            describe,
            |m| m.active_rentals.to_string(),
        );
        output::print_output(&out, quiet);
        Ok(())
    })
    .await
    .map_err(CliError::from)
}

fn describe(m: &DashboardMetrics) -> String {
    let mut lines = vec![
        format!("Total revenue:      {:.2}", m.total_revenue),
        format!("Revenue per minute: {:.2}", m.revenue_per_minute),
        format!("Active rentals:     {}", m.active_rentals),
        format!("Customers:          {}", m.total_users),
        format!(
            "Consoles:           {} ({} available)",
            m.total_consoles, m.available_consoles
        ),
    ];

    if !m.activity.is_empty() {
        lines.push(String::new());
        lines.push("Recent activity:".into());
        for entry in &m.activity {
            let time = entry
                .time
                .map(|t| t.format("%m-%d %H:%M").to_string())
                .unwrap_or_default();
            lines.push(format!("  {time}  {}", entry.title));
        }
    }

    lines.join("\n")
}
