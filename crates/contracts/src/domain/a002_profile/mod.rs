pub mod edit;
pub mod moderation;
pub mod photo;
pub mod snapshot;

pub use moderation::{ModerationAction, ModerationStatus};
pub use snapshot::ProfileSnapshot;
