//! `slnkit info <solution>`: items, startup project and provenance.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use slnkit_core::{Project, Solution, SolutionItem};

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Solution document.
    pub path: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl InfoArgs {
    pub fn run(self) -> Result<()> {
        let solution = super::open(&super::absolute(&self.path)?)?;
        let report = SolutionReport::from(&solution);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        print_table(&report);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SolutionReport {
    id: String,
    name: String,
    format: String,
    location: String,
    startup: Option<String>,
    migrated_from: Option<String>,
    items: Vec<ItemReport>,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ItemReport {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    item_type: String,
    #[tabled(rename = "reference")]
    reference: String,
    #[tabled(rename = "loaded")]
    loaded: bool,
}

impl From<&Solution> for SolutionReport {
    fn from(solution: &Solution) -> Self {
        let items = solution
            .items()
            .iter()
            .map(|item| match item {
                SolutionItem::Project(project) => ItemReport {
                    kind: item.kind().to_string(),
                    name: project.name().to_owned(),
                    item_type: project.type_name().to_owned(),
                    reference: solution.relative_reference(project.location()),
                    loaded: project.is_loaded(),
                },
                SolutionItem::Folder(folder) => ItemReport {
                    kind: item.kind().to_string(),
                    name: folder.name().to_owned(),
                    item_type: String::new(),
                    reference: String::new(),
                    loaded: true,
                },
            })
            .collect();

        Self {
            id: solution.id().to_string(),
            name: solution.name(),
            format: solution.format().to_string(),
            location: solution.location().display().to_string(),
            startup: solution.startup_project().map(|p| p.name().to_owned()),
            migrated_from: solution.migrated_from().map(str::to_owned),
            items,
        }
    }
}

fn print_table(report: &SolutionReport) {
    println!("Solution {} ({})", report.name, report.format);
    println!("  {}", report.location);
    println!(
        "  startup: {}",
        report.startup.as_deref().unwrap_or("(none)")
    );
    if let Some(legacy) = &report.migrated_from {
        println!("  migrated from: {legacy}");
    }
    if report.items.is_empty() {
        println!("\nNo items.");
        return;
    }
    let mut table = Table::new(report.items.clone());
    table.with(Style::rounded());
    println!("\n{table}");
}
