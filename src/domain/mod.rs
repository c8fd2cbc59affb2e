//! Domain types for the Test Pilot effects layer.
//! Defines the records carried by actions and handed to host collaborators.

pub mod env;
pub mod error;
pub mod experiment;
pub mod feedback;

pub use env::*;
pub use error::*;
pub use experiment::*;
pub use feedback::*;
