//! Side-effect dispatcher for the Test Pilot add-on.
//!
//! Actions go through [`store::Store`]; [`store::SideEffects`] turns the effect
//! each action selects into calls on the [`host`] collaborators.

pub mod domain;
pub mod host;
pub mod infra;
pub mod store;
