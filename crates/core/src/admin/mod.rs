//! Admin module - platform-wide analytics for admin identities.

mod admin_model;
mod admin_service;
mod admin_traits;


pub use admin_model::{ActivityRecord, ActivitySource, PlatformStats, UserActivity};
pub use admin_service::{summarize_user_activity, AdminService};
pub use admin_traits::{ActivityRepositoryTrait, AdminServiceTrait};
