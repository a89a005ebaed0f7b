pub mod dispatch;
pub mod draw;
pub mod matcher;
pub mod message;

pub use crate::domain::model::{Assignment, MatchMode, Participant, Target, TargetPool};
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
