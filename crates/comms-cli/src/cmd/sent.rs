use crate::cmd::open_store;
use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use comms_core::history::{record_communication, NewComm, SentDraft};
use comms_core::types::{today, Audience, CommType};
use std::path::Path;

#[derive(Args)]
pub struct SentArgs {
    project_id: String,
    /// users, developers or management
    #[arg(long)]
    audience: String,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    body: String,
    /// Target date of the planned communication this fulfils
    #[arg(long)]
    planned_comm_id: Option<String>,
    /// Communication type (default: the planned communication's type)
    #[arg(long = "type")]
    comm_type: Option<String>,
    /// Key point (repeatable)
    #[arg(long = "key-point")]
    key_points: Vec<String>,
}

/// Mark a reviewed draft as sent: append it to history and reconcile the
/// plan. Nothing is emailed.
pub fn run(root: &Path, args: SentArgs, json: bool) -> anyhow::Result<()> {
    let sent = SentDraft {
        project_id: args.project_id,
        audience: args.audience.parse::<Audience>()?,
        subject: args.subject,
        body: args.body,
        key_points: args.key_points,
        planned_comm_id: args.planned_comm_id,
        comm_type: args
            .comm_type
            .as_deref()
            .map(str::parse::<CommType>)
            .transpose()?,
    };

    let recorded = open_store(root)?
        .update(&sent.project_id, |p| {
            let comm = NewComm::from_sent_draft(p, &sent);
            Ok(record_communication(p, comm, today()))
        })
        .with_context(|| format!("failed to record sent email for {}", sent.project_id))?;

    if json {
        return print_json(&serde_json::json!({
            "communication": recorded.record,
            "reconciled": recorded.reconciled,
        }));
    }
    println!("Email marked as sent and history updated ({})", recorded.record.id);
    if recorded.reconciled > 0 {
        println!("  {} planned communication(s) marked sent", recorded.reconciled);
    }
    Ok(())
}
