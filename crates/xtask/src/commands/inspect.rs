//! Load a scenario and print its containers

use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use item_content::{ContentFactory, ScenarioBundle};
use item_core::{ItemTypeId, MapOracle, Position, Visitable};

use crate::dirs;

/// Load a scenario and print what it contains
#[derive(Parser)]
pub struct Inspect {
    /// Scenario name under `scenarios/` (without `.ron`)
    #[arg(value_name = "SCENARIO", default_value = "depot")]
    scenario: String,

    /// Custom content directory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable overview
    Summary,
    /// Full JSON output
    Json,
}

#[derive(Serialize)]
struct TileReport {
    position: Position,
    items: usize,
    luminosity: u32,
    active: usize,
}

#[derive(Serialize)]
struct VehicleReport {
    name: String,
    position: Position,
    parts: usize,
    cargo_items: usize,
    mass_grams: u32,
}

#[derive(Serialize)]
struct CharacterReport {
    name: String,
    position: Position,
    items: Vec<String>,
    ups_charges: u32,
}

#[derive(Serialize)]
struct ScenarioReport {
    scenario: String,
    item_types: usize,
    map_size: (u32, u32),
    tiles: Vec<TileReport>,
    vehicles: Vec<VehicleReport>,
    characters: Vec<CharacterReport>,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir)?;
        let bundle = ContentFactory::new(&data_dir).load_scenario(&self.scenario)?;
        let report = build_report(&self.scenario, &bundle);

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

fn build_report(scenario: &str, bundle: &ScenarioBundle) -> ScenarioReport {
    let world = &bundle.world;
    let dims = bundle.layout.dimensions();

    let tiles = world
        .map
        .occupied()
        .map(|(position, tile)| TileReport {
            position,
            items: world.map.cursor(&bundle.layout, position).all_items().len(),
            luminosity: tile.luminosity(),
            active: tile.active_items().len(),
        })
        .collect();

    let vehicles = world
        .vehicles
        .iter()
        .map(|vehicle| VehicleReport {
            name: vehicle.name.clone(),
            position: vehicle.position,
            parts: vehicle.parts().len(),
            cargo_items: (0..vehicle.parts().len())
                .map(|part| vehicle.cursor(part).all_items().len())
                .sum(),
            mass_grams: vehicle.total_mass(&bundle.catalog),
        })
        .collect();

    let characters = world
        .characters
        .iter()
        .map(|character| CharacterReport {
            name: character.name.clone(),
            position: character.position,
            items: character
                .all_items()
                .iter()
                .map(|item| item.type_id().to_string())
                .collect(),
            ups_charges: character.charges_of(&ItemTypeId::UPS, u32::MAX),
        })
        .collect();

    ScenarioReport {
        scenario: scenario.to_string(),
        item_types: bundle.catalog.len(),
        map_size: (dims.width, dims.height),
        tiles,
        vehicles,
        characters,
    }
}

fn print_summary(report: &ScenarioReport) {
    println!(
        "{} {}",
        style("=== Scenario ===").bold().green(),
        style(&report.scenario).bold()
    );
    println!("  Item types: {}", report.item_types);
    println!("  Map size: {}x{}", report.map_size.0, report.map_size.1);
    println!();

    println!("{}", style("Tiles:").bold().yellow());
    for tile in &report.tiles {
        let visible = if tile.items == 0 {
            style("hidden".to_string()).dim()
        } else {
            style(format!("{} visible", tile.items))
        };
        println!(
            "  {} {} (light {}, active {})",
            tile.position, visible, tile.luminosity, tile.active
        );
    }
    println!();

    println!("{}", style("Vehicles:").bold().yellow());
    for vehicle in &report.vehicles {
        println!(
            "  {} at {}: {} parts, {} cargo items, {:.1} kg",
            style(&vehicle.name).cyan(),
            vehicle.position,
            vehicle.parts,
            vehicle.cargo_items,
            f64::from(vehicle.mass_grams) / 1000.0
        );
    }
    println!();

    println!("{}", style("Characters:").bold().yellow());
    for character in &report.characters {
        println!(
            "  {} at {} (UPS charges: {})",
            style(&character.name).cyan(),
            character.position,
            character.ups_charges
        );
        println!("    {}", character.items.join(", "));
    }
}
