//! Container selection for commands

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use item_content::ScenarioBundle;
use item_core::{CargoSlot, Position, TempCraftingInventory, Visitable, WorldError};

/// A container inside a loaded scenario.
///
/// Accepted forms:
/// - `character:NAME`
/// - `tile:X,Y`
/// - `area:X,Y[,RADIUS]` (accessible tiles only)
/// - `cargo:VEHICLE:PART`
/// - `vehicles:X,Y[,RADIUS]`
/// - `crafting:NAME`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Character(String),
    Tile(Position),
    Area { center: Position, radius: Option<u32> },
    Cargo(CargoSlot),
    Vehicles { center: Position, radius: Option<u32> },
    Crafting(String),
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("Target must look like KIND:ARGS, got '{}'", s))?;

        match kind {
            "character" => Ok(Target::Character(rest.to_string())),
            "crafting" => Ok(Target::Crafting(rest.to_string())),
            "tile" => {
                let (pos, radius) = parse_point(rest)?;
                if radius.is_some() {
                    bail!("tile targets take no radius");
                }
                Ok(Target::Tile(pos))
            }
            "area" => {
                let (center, radius) = parse_point(rest)?;
                Ok(Target::Area { center, radius })
            }
            "vehicles" => {
                let (center, radius) = parse_point(rest)?;
                Ok(Target::Vehicles { center, radius })
            }
            "cargo" => {
                let (vehicle, part) = rest
                    .split_once(':')
                    .ok_or_else(|| anyhow!("cargo target must be cargo:VEHICLE:PART"))?;
                Ok(Target::Cargo(CargoSlot {
                    vehicle: vehicle.parse().context("vehicle index")?,
                    part: part.parse().context("part index")?,
                }))
            }
            other => bail!("Unknown target kind '{}'", other),
        }
    }
}

fn parse_point(s: &str) -> Result<(Position, Option<u32>)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [x, y] => Ok((Position::new(x.parse()?, y.parse()?), None)),
        [x, y, r] => Ok((Position::new(x.parse()?, y.parse()?), Some(r.parse()?))),
        _ => bail!("Expected X,Y or X,Y,RADIUS, got '{}'", s),
    }
}

impl Target {
    /// Builds the container this target names and hands it to `f`.
    pub fn with_container<R>(
        &self,
        bundle: &ScenarioBundle,
        f: impl FnOnce(&dyn Visitable) -> R,
    ) -> Result<R> {
        let world = &bundle.world;
        let layout = &bundle.layout;
        let default_radius = world.config.selector_radius;

        let result = match self {
            Target::Character(name) => f(world.character(name)?),
            Target::Tile(pos) => f(&world.map.cursor(layout, *pos)),
            Target::Area { center, radius } => f(&world.map.select(
                layout,
                *center,
                radius.unwrap_or(default_radius),
                true,
            )),
            Target::Cargo(slot) => {
                let vehicle = world
                    .vehicles
                    .get(slot.vehicle)
                    .ok_or(WorldError::UnknownVehicle(slot.vehicle))?;
                f(&vehicle.cursor(slot.part))
            }
            Target::Vehicles { center, radius } => f(&world
                .vehicles
                .select(*center, radius.unwrap_or(default_radius))),
            Target::Crafting(name) => {
                let crafting: TempCraftingInventory<'_> = world.crafting_inventory(layout, name)?;
                f(&crafting)
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_target_kind() {
        assert_eq!(
            "character:survivor".parse::<Target>().unwrap(),
            Target::Character("survivor".into())
        );
        assert_eq!(
            "tile:2,3".parse::<Target>().unwrap(),
            Target::Tile(Position::new(2, 3))
        );
        assert_eq!(
            "area:1, 1, 4".parse::<Target>().unwrap(),
            Target::Area {
                center: Position::new(1, 1),
                radius: Some(4)
            }
        );
        assert_eq!(
            "cargo:0:1".parse::<Target>().unwrap(),
            Target::Cargo(CargoSlot {
                vehicle: 0,
                part: 1
            })
        );
    }

    #[test]
    fn rejects_malformed_targets() {
        assert!("survivor".parse::<Target>().is_err());
        assert!("tile:1".parse::<Target>().is_err());
        assert!("tile:1,2,3".parse::<Target>().is_err());
        assert!("cargo:0".parse::<Target>().is_err());
        assert!("shelf:0,0".parse::<Target>().is_err());
    }
}
