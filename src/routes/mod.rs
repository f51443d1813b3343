//! HTTP routes for Trail

pub mod health;
pub mod interruptions;

pub use health::health_check;
pub use interruptions::{
    create_interruption, delete_interruption, list_interruptions, search_interruptions,
    update_interruption,
};
