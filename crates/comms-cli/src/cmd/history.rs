use crate::cmd::open_store;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use comms_core::form::ManualCommForm;
use comms_core::history::record_communication;
use comms_core::types::today;
use std::path::Path;

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// Record a communication sent outside the tool
    Add {
        project_id: String,
        /// users, developers or management
        #[arg(long)]
        audience: String,
        #[arg(long)]
        subject: String,
        /// status_update, launch_announcement, new_features or management_update
        #[arg(long = "type")]
        comm_type: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Key message (repeatable)
        #[arg(long = "key-messages")]
        key_messages: Vec<String>,
        /// Comma-separated recipients
        #[arg(long)]
        sent_to: Option<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List a project's communication history
    List { project_id: String },
}

pub fn run(root: &Path, subcmd: HistorySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        HistorySubcommand::Add {
            project_id,
            audience,
            subject,
            comm_type,
            summary,
            key_messages,
            sent_to,
            date,
        } => {
            let form = ManualCommForm {
                date_sent: date,
                comm_type,
                audience: Some(audience),
                subject: Some(subject),
                summary,
                key_messages: Some(key_messages.join("\n")),
                sent_to,
            };
            add(root, &project_id, form, json)
        }
        HistorySubcommand::List { project_id } => list(root, &project_id, json),
    }
}

fn add(root: &Path, project_id: &str, form: ManualCommForm, json: bool) -> anyhow::Result<()> {
    let comm = form.into_new_comm()?;
    let recorded = open_store(root)?
        .update(project_id, |p| Ok(record_communication(p, comm, today())))
        .with_context(|| format!("failed to record communication for {project_id}"))?;

    if json {
        return print_json(&recorded.record);
    }
    println!(
        "Recorded {} to {} on {} ({})",
        recorded.record.comm_type,
        recorded.record.audience,
        recorded.record.date_sent,
        recorded.record.id
    );
    Ok(())
}

fn list(root: &Path, project_id: &str, json: bool) -> anyhow::Result<()> {
    let project = open_store(root)?.get(project_id)?;
    if json {
        return print_json(&project.comms_history);
    }
    if project.comms_history.is_empty() {
        println!("No communications recorded for '{}'.", project.name);
        return Ok(());
    }
    let rows = project
        .comms_history
        .iter()
        .map(|c| {
            vec![
                c.date_sent.clone(),
                c.audience.to_string(),
                c.comm_type.to_string(),
                c.subject.clone(),
                c.sent_to.join(", "),
            ]
        })
        .collect();
    print_table(&["DATE", "AUDIENCE", "TYPE", "SUBJECT", "SENT TO"], rows);
    Ok(())
}
