//! Run derived queries against a scenario container

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use item_content::ContentFactory;
use item_core::{ItemOracle, ItemTypeId, NutritionProfile, QualityId, Visitable};

use super::target::Target;
use crate::dirs;

/// Run one query against a container in a scenario
#[derive(Parser)]
pub struct Query {
    /// Container to query (e.g. character:survivor, tile:2,2, cargo:0:1)
    #[arg(value_name = "TARGET")]
    target: Target,

    /// Query to run
    #[arg(value_enum)]
    kind: QueryKind,

    /// Item type or quality id the query is about
    #[arg(value_name = "ID")]
    id: Option<String>,

    /// Scenario name under `scenarios/`
    #[arg(short, long, default_value = "depot")]
    scenario: String,

    /// Upper bound for amount and charge queries
    #[arg(short, long, default_value_t = u32::MAX)]
    limit: u32,

    /// Minimum quality level for `has-quality`
    #[arg(long, default_value_t = 1)]
    level: i32,

    /// Count pseudo items (bionic tools, crafting fixtures)
    #[arg(long)]
    pseudo: bool,

    /// Custom content directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
enum QueryKind {
    /// Every item in traversal order
    Items,
    /// Top-level items only
    TopLevel,
    /// Number of items of a type
    Amount,
    /// Sum of charges of a type
    Charges,
    /// Highest rating of a quality
    MaxQuality,
    /// Whether `--limit` units meet `--level` of a quality
    HasQuality,
    /// Calorie range of a food type
    Kcal,
}

#[derive(Serialize)]
struct QueryReport {
    target: String,
    query: QueryKind,
    id: Option<String>,
    result: serde_json::Value,
}

impl Query {
    pub fn execute(self) -> Result<()> {
        let needs_id = !matches!(self.kind, QueryKind::Items | QueryKind::TopLevel);
        if needs_id && self.id.is_none() {
            bail!("Query {:?} needs an ID argument", self.kind);
        }

        let data_dir = dirs::data_dir(self.data_dir.clone())?;
        let bundle = ContentFactory::new(&data_dir).load_scenario(&self.scenario)?;
        let items: &dyn ItemOracle = &bundle.catalog;

        let result = self
            .target
            .with_container(&bundle, |container| self.run(container, items))?;

        let report = QueryReport {
            target: format!("{:?}", self.target),
            query: self.kind,
            id: self.id.clone(),
            result,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} {:?} {}",
                style(&report.target).cyan(),
                report.query,
                report.id.as_deref().unwrap_or("")
            );
            println!("  {}", style(&report.result).bold());
        }
        Ok(())
    }

    fn run(&self, container: &dyn Visitable, items: &dyn ItemOracle) -> serde_json::Value {
        let id = self.id.as_deref().unwrap_or_default();
        let type_id = ItemTypeId::new(id);
        let quality = QualityId::new(id);

        match self.kind {
            QueryKind::Items => names(container.all_items()),
            QueryKind::TopLevel => names(container.top_level()),
            QueryKind::Amount => container.amount_of(&type_id, self.pseudo, self.limit).into(),
            QueryKind::Charges => container.charges_of(&type_id, self.limit).into(),
            QueryKind::MaxQuality => container.max_quality(items, &quality).into(),
            QueryKind::HasQuality => container
                .has_quality(items, &quality, self.level, self.limit)
                .into(),
            QueryKind::Kcal => {
                let range =
                    container.kcal_range(items, &type_id, &|_| true, &NutritionProfile::default());
                serde_json::to_value(range).unwrap_or_default()
            }
        }
    }
}

fn names(items: Vec<&item_core::Item>) -> serde_json::Value {
    items
        .iter()
        .map(|item| format!("{} {}", item.uid(), item.type_id()))
        .collect::<Vec<_>>()
        .into()
}
