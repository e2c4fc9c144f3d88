use crate::cmd::{load_state, runtime};
use crate::output::print_json;
use comms_server::agent::DraftTarget;
use std::path::Path;

/// Draft one email per audience of the planned communication due on
/// `planned_comm_id`. Drafts are printed, not stored.
pub fn run(root: &Path, project_id: &str, planned_comm_id: &str, json: bool) -> anyhow::Result<()> {
    let state = load_state(root)?;
    let target = DraftTarget {
        planned_comm: None,
        planned_comm_id: Some(planned_comm_id.to_string()),
    };
    let drafts = runtime()?.block_on(state.agent.generate_drafts(project_id, target))?;

    if json {
        return print_json(&drafts);
    }
    println!("Generated {} draft(s)", drafts.len());
    for d in &drafts {
        println!("\n=== {} ({}) ===", d.audience, d.draft_id);
        println!("Subject: {}\n", d.subject);
        println!("{}", d.body);
        if !d.key_points.is_empty() {
            println!("\nKey points:");
            for k in &d.key_points {
                println!("  - {k}");
            }
        }
    }
    println!(
        "\nRecord a draft once sent with: comms sent {project_id} --audience <AUDIENCE> \
         --subject <SUBJECT> --body <BODY> --planned-comm-id {planned_comm_id}"
    );
    Ok(())
}
