//! Analytics stages
//!
//! Adapters between loaded tables and the optimization and mining crates.
//! Each stage is a plain function from tables to a `StageResult`.

pub mod copick;
pub mod facility;
pub mod relocation;
pub mod slotting;
pub mod summary;

pub use copick::{build_basket_view, mine_copick_rules};
pub use facility::{select_facilities, CostModel, FacilityConfig, FacilitySelection, SolverKind};
pub use relocation::{suggest_relocations, RelocationSuggestion};
pub use slotting::{aggregate_slotting, CategoryCount};
pub use summary::{summarize, validate, DataSummary, Validation, ValidationFlags};
