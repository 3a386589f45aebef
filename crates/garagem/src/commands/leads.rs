//! Lead command handlers.

use std::fmt::Write as _;

use chrono::DateTime;
use tabled::Tabled;

use garagem_core::{Lead, LeadDetails};

use crate::cli::{GlobalOpts, LeadsArgs, LeadsCommand, LeadsListArgs};
use crate::config::Backend;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct LeadRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Summary")]
    summary: String,
}

impl output::Listable for Lead {
    type Row = LeadRow;

    fn to_row(&self) -> LeadRow {
        LeadRow {
            id: self.id.clone(),
            kind: self.details.kind().to_string(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            date: format_date(&self.date),
            summary: summarize(&self.details),
        }
    }

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Render the server timestamp as a local date, falling back to the raw
/// string when it does not parse.
fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

fn summarize(details: &LeadDetails) -> String {
    match details {
        LeadDetails::Sell {
            vehicle_brand,
            vehicle_model,
            expected_value,
            ..
        } => format!("{vehicle_brand} {vehicle_model} for {expected_value}"),
        LeadDetails::Finance {
            vehicle_value,
            installments,
            ..
        } => format!("{vehicle_value} in {installments}x"),
        LeadDetails::Interest {
            vehicle_brand,
            vehicle_model,
            ..
        } => format!("{vehicle_brand} {vehicle_model}"),
    }
}

/// Full single-lead detail view for table output.
fn detail(lead: &Lead) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:    {}", lead.id);
    let _ = writeln!(out, "Type:  {}", lead.details.kind());
    let _ = writeln!(out, "Name:  {}", lead.name);
    let _ = writeln!(out, "Phone: {}", lead.phone);
    let _ = writeln!(out, "Email: {}", lead.email);
    let _ = writeln!(out, "Date:  {}", format_date(&lead.date));

    match &lead.details {
        LeadDetails::Sell {
            vehicle_brand,
            vehicle_model,
            vehicle_year,
            vehicle_mileage,
            expected_value,
            observations,
        } => {
            let _ = writeln!(out, "Vehicle:        {vehicle_brand} {vehicle_model} ({vehicle_year})");
            let _ = writeln!(out, "Mileage:        {vehicle_mileage}");
            let _ = writeln!(out, "Expected value: {expected_value}");
            if !observations.is_empty() {
                let _ = writeln!(out, "Observations:   {observations}");
            }
        }
        LeadDetails::Finance {
            cpf,
            vehicle_value,
            entry_value,
            installments,
        } => {
            let _ = writeln!(out, "CPF:           {cpf}");
            let _ = writeln!(out, "Vehicle value: {vehicle_value}");
            let _ = writeln!(out, "Entry value:   {entry_value}");
            let _ = writeln!(out, "Installments:  {installments}");
        }
        LeadDetails::Interest {
            vehicle_id,
            vehicle_brand,
            vehicle_model,
        } => {
            let _ = writeln!(out, "Vehicle: {vehicle_brand} {vehicle_model} (id {vehicle_id})");
        }
    }

    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backend: &Backend,
    args: LeadsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_login(backend)?;

    match args.command {
        LeadsCommand::List(list) => handle_list(backend, &list, global).await,
        LeadsCommand::Show { id } => handle_show(backend, &id, global).await,
        LeadsCommand::Delete { id } => handle_delete(backend, &id, global).await,
    }
}

async fn handle_list(
    backend: &Backend,
    list: &LeadsListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut leads = backend.store.list_leads().await;
    if let Some(kind) = list.kind {
        let kind: garagem_core::LeadKind = kind.into();
        leads.retain(|l| l.details.kind() == kind);
    }

    let out = output::render_list(&global.output, &leads);
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_show(backend: &Backend, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let leads = backend.store.list_leads().await;
    let lead = leads
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "lead".into(),
            identifier: id.into(),
            list_command: "leads list".into(),
        })?;

    let out = output::render_detail(&global.output, lead, detail);
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_delete(backend: &Backend, id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(&format!("Delete lead '{id}'? This is permanent."), global.yes)? {
        return Ok(());
    }

    if !backend.store.delete_lead(id).await {
        return Err(CliError::OperationFailed {
            action: format!("Lead delete for '{id}'"),
        });
    }

    if !global.quiet {
        eprintln!("Lead deleted");
    }
    Ok(())
}
