use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    config::Settings,
    launch::{LaunchEnv, LaunchPlan, diagnostics},
    types::{CommandSpec, Phase},
};

#[derive(Args, Debug)]
pub struct PlanCommand {
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the effective launcher settings
    #[arg(long)]
    pub settings: bool,
}

/// What a launch would do. The connection string only appears as its prefix.
#[derive(Debug, Serialize)]
pub struct PlanView {
    pub connection_string_var: String,
    pub connection_string_set: bool,
    pub connection_string_prefix: String,
    pub port_var: String,
    pub missing_required: Vec<String>,
    pub plan: LaunchPlan,
}

impl PlanView {
    pub fn new(settings: &Settings, env: &LaunchEnv) -> Result<Self> {
        let plan = LaunchPlan::resolve(settings, env).context("Failed to resolve launch plan")?;

        Ok(Self {
            connection_string_var: env.connection_string_var.clone(),
            connection_string_set: env.connection_string_set(),
            connection_string_prefix: env.connection_string_prefix(),
            port_var: env.port_var.clone(),
            missing_required: env.missing_required.clone(),
            plan,
        })
    }
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    index: String,

    #[tabled(rename = "Phase")]
    phase: String,

    #[tabled(rename = "Program")]
    program: String,

    #[tabled(rename = "Arguments")]
    args: String,
}

impl StepRow {
    fn new(index: usize, phase: Phase, command: &CommandSpec) -> Self {
        Self {
            index: index.to_string(),
            phase: phase.to_colored_string(),
            program: command.program.clone(),
            args: command.args_line(),
        }
    }
}

pub async fn execute(args: &PlanCommand, settings: &Settings) -> i32 {
    match render(args, settings) {
        Ok(out) => {
            println!("{}", out);
            if args.settings {
                settings.print_config();
            }
            0
        }
        Err(e) => {
            eprintln!("❌ {:#}", e);
            1
        }
    }
}

fn render(args: &PlanCommand, settings: &Settings) -> Result<String> {
    let env = LaunchEnv::from_process(&settings.vars);
    let view = PlanView::new(settings, &env)?;

    if args.json {
        return serde_json::to_string_pretty(&view).context("Failed to serialize launch plan");
    }
    Ok(render_table(&view))
}

fn render_table(view: &PlanView) -> String {
    let rows = vec![
        StepRow::new(1, Phase::Migrating, &view.plan.migration),
        StepRow::new(2, Phase::Serving, &view.plan.server),
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();

    let mut lines = vec![
        diagnostics::presence_line(&view.connection_string_var, view.connection_string_set),
        diagnostics::prefix_line(&view.connection_string_var, &view.connection_string_prefix),
        format!("{}: {}", view.port_var, view.plan.port),
        format!("Server mode: {}", view.plan.mode),
    ];
    if !view.missing_required.is_empty() {
        lines.push(format!("Missing: {}", view.missing_required.join(", ")));
    }
    lines.push(table);

    lines.join("\n")
}
