use crate::cmd::open_store;
use crate::output::{print_json, print_table};
use anyhow::Context;
use comms_core::config::Config;
use comms_core::due::due_communications;
use comms_core::types::today;
use std::path::Path;

pub fn run(root: &Path, window: Option<u32>, json: bool) -> anyhow::Result<()> {
    let window = match window {
        Some(w) => w,
        None => {
            Config::load(root)
                .context("failed to load config")?
                .schedule
                .due_window_days
        }
    };
    let projects = open_store(root)?.list().context("failed to load projects")?;
    let due = due_communications(&projects, today(), window);

    if json {
        return print_json(&due);
    }
    if due.is_empty() {
        println!("No communications due in the next {window} day(s).");
        return Ok(());
    }

    let rows = due
        .iter()
        .map(|d| {
            let when = match d.days_until_due {
                0 => "today".to_string(),
                1 => "in 1 day".to_string(),
                n => format!("in {n} days"),
            };
            vec![
                d.planned_comm.target_date.clone(),
                when,
                d.project_id.clone(),
                d.project_name.clone(),
                d.planned_comm.comm_type.to_string(),
                d.planned_comm
                    .audiences
                    .iter()
                    .map(|a| a.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ]
        })
        .collect();
    print_table(
        &["DATE", "DUE", "PROJECT ID", "PROJECT", "TYPE", "AUDIENCES"],
        rows,
    );
    Ok(())
}
