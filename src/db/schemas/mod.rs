//! Document schemas

pub mod interruption;

pub use interruption::{Interruption, INTERRUPTION_COLLECTION};
