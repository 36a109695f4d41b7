//! Containers that hold item trees, and the cursors and selectors that view
//! parts of them.
//!
//! Owning containers ([`Inventory`], [`Character`], [`ItemMap`],
//! [`Vehicles`]) keep their items by value. Cursors name one location inside
//! an owner (a map tile, a cargo part) and selectors range over many
//! locations; both borrow the owner, and only implement
//! [`crate::VisitableMut`] when the borrow is exclusive.
mod character;
mod crafting;
mod inventory;
mod map;
mod vehicle;

pub use character::{Bionic, Character, MountedTool, PowerState, TraitBonus};
pub use crafting::TempCraftingInventory;
pub use inventory::{Inventory, InventoryStack};
pub use map::{ItemMap, MapCursor, MapSelector, TileStack};
pub use vehicle::{CargoSlot, Vehicle, VehicleCursor, VehiclePart, VehicleSelector, Vehicles};
