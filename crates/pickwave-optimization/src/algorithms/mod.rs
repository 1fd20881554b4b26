pub mod branch_bound;
pub mod enumeration;

pub use branch_bound::BranchAndBoundSolver;
pub use enumeration::EnumerationSolver;
