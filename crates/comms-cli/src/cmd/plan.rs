use crate::cmd::{load_state, open_store, runtime};
use crate::output::{print_json, print_table};
use clap::Subcommand;
use comms_core::plan::CommsPlan;
use comms_server::agent::PlanSource;
use std::path::Path;

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Generate a communications plan, replacing the current one
    Generate { id: String },
    /// Show the stored communications plan
    Show { id: String },
}

pub fn run(root: &Path, subcmd: PlanSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PlanSubcommand::Generate { id } => generate(root, &id, json),
        PlanSubcommand::Show { id } => show(root, &id, json),
    }
}

fn generate(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let state = load_state(root)?;
    let generated = runtime()?.block_on(state.agent.generate_plan(id))?;

    if json {
        return print_json(&generated);
    }
    let source = match generated.source {
        PlanSource::Llm => format!("generated by {}", state.agent.backend()),
        PlanSource::Fallback => "template fallback".to_string(),
    };
    println!(
        "Communications plan generated successfully ({source}, {} entries)\n",
        generated.plan.planned_communications.len()
    );
    print_plan(&generated.plan);
    Ok(())
}

fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let project = open_store(root)?.get(id)?;
    if json {
        return print_json(&project.comms_plan);
    }
    if project.comms_plan.planned_communications.is_empty() {
        println!("No communications plan yet. Run: comms plan generate {id}");
        return Ok(());
    }
    println!(
        "Plan for '{}' generated {} ({})\n",
        project.name,
        project.comms_plan.generated_date.as_deref().unwrap_or("-"),
        project.comms_plan.planning_horizon.as_deref().unwrap_or("-"),
    );
    print_plan(&project.comms_plan);
    Ok(())
}

fn print_plan(plan: &CommsPlan) {
    let rows = plan
        .planned_communications
        .iter()
        .map(|c| {
            vec![
                c.target_date.clone(),
                c.comm_type.to_string(),
                c.audiences
                    .iter()
                    .map(|a| a.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                c.status.to_string(),
                c.reason.clone(),
            ]
        })
        .collect();
    print_table(&["DATE", "TYPE", "AUDIENCES", "STATUS", "REASON"], rows);
}
