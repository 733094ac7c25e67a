pub mod inventory;
pub mod report;
pub mod settings;

pub use inventory::{ResourceTotals, VmInventory};
pub use settings::Settings;
