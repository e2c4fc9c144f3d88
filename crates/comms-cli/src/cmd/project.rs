use crate::cmd::open_store;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::{Args, Subcommand};
use comms_core::form::ProjectForm;
use comms_core::project::Project;
use comms_core::types::{today, Audience};
use std::path::Path;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// List all projects
    List,
    /// Show a project with its stakeholders, milestones and history
    Show { id: String },
    /// Create a project
    Create(CreateArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    owner: Option<String>,
    /// planning, active, on_hold, launched or completed
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    business_value: Option<String>,
    /// YYYY-MM-DD (default: today)
    #[arg(long = "start")]
    start_date: Option<String>,
    #[arg(long)]
    phase: Option<String>,
    /// Expected launch date
    #[arg(long)]
    launch: Option<String>,
    /// Comma-separated user emails
    #[arg(long)]
    users: Option<String>,
    /// Comma-separated developer emails
    #[arg(long)]
    developers: Option<String>,
    /// Comma-separated management emails
    #[arg(long)]
    management: Option<String>,
    /// Recent update (repeatable)
    #[arg(long = "updates")]
    updates: Vec<String>,
    /// `DATE: DESCRIPTION` (repeatable)
    #[arg(long = "milestones")]
    milestones: Vec<String>,
}

impl CreateArgs {
    fn into_form(self) -> ProjectForm {
        ProjectForm {
            name: Some(self.name),
            owner: self.owner,
            status: self.status,
            description: self.description,
            business_value: self.business_value,
            start_date: self.start_date,
            current_phase: self.phase,
            expected_launch: self.launch,
            users: self.users,
            developers: self.developers,
            management: self.management,
            recent_updates: Some(self.updates.join("\n")),
            milestones: Some(self.milestones.join("\n")),
        }
    }
}

pub fn run(root: &Path, subcmd: ProjectSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::List => list(root, json),
        ProjectSubcommand::Show { id } => show(root, &id, json),
        ProjectSubcommand::Create(args) => create(root, args, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let projects = open_store(root)?
        .list()
        .context("failed to load projects")?;

    if json {
        return print_json(&projects);
    }
    if projects.is_empty() {
        println!("No projects. Create one with: comms project create --name <NAME>");
        return Ok(());
    }

    let rows = projects
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                or_dash(&p.owner),
                p.status.to_string(),
                or_dash(&p.expected_launch),
                p.last_comm_date().to_string(),
                p.comms_plan.pending_count().to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "NAME", "OWNER", "STATUS", "LAUNCH", "LAST COMM", "PENDING"],
        rows,
    );
    Ok(())
}

fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let project = open_store(root)?.get(id)?;
    if json {
        return print_json(&project);
    }
    print_project(&project);
    Ok(())
}

fn create(root: &Path, args: CreateArgs, json: bool) -> anyhow::Result<()> {
    let project = args.into_form().into_project(today())?;
    let project = open_store(root)?
        .insert(project)
        .context("failed to save project")?;

    if json {
        return print_json(&project);
    }
    println!("Created project '{}' ({})", project.name, project.id);
    Ok(())
}

fn print_project(p: &Project) {
    println!("{}  [{}]", p.name, p.status);
    println!("  id:        {}", p.id);
    println!("  owner:     {}", or_dash(&p.owner));
    println!("  started:   {}", or_dash(&p.start_date));
    println!("  phase:     {}", or_dash(&p.current_phase));
    println!("  launch:    {}", or_dash(&p.expected_launch));
    if !p.description.is_empty() {
        println!("\n{}", p.description);
    }
    if !p.business_value.is_empty() {
        println!("\nBusiness value: {}", p.business_value);
    }

    println!("\nSTAKEHOLDERS");
    for &audience in Audience::all() {
        let list = p.stakeholders.for_audience(audience);
        println!("  {:<12} {}", audience.as_str(), or_dash(&list.join(", ")));
    }

    if !p.recent_updates.is_empty() {
        println!("\nRECENT UPDATES");
        for u in &p.recent_updates {
            println!("  - {u}");
        }
    }
    if !p.upcoming_milestones.is_empty() {
        println!("\nMILESTONES");
        for m in &p.upcoming_milestones {
            println!("  {}  {}", m.date, m.description);
        }
    }

    println!(
        "\nPLAN  {} pending of {}",
        p.comms_plan.pending_count(),
        p.comms_plan.planned_communications.len()
    );

    println!("\nHISTORY");
    if p.comms_history.is_empty() {
        println!("  (none)");
        return;
    }
    let rows = p
        .comms_history
        .iter()
        .map(|c| {
            vec![
                c.date_sent.clone(),
                c.audience.to_string(),
                c.comm_type.to_string(),
                c.subject.clone(),
            ]
        })
        .collect();
    print_table(&["DATE", "AUDIENCE", "TYPE", "SUBJECT"], rows);
}
