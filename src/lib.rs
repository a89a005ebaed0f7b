pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "sns")]
pub use config::sns::SnsNotifier;

pub use crate::config::santa_config::SantaConfig;
pub use crate::core::{
    dispatch::{Dispatcher, FailurePolicy, OutboundMessage},
    draw::{DrawResult, SecretSantaDraw},
    matcher::{assign, Matcher},
};
pub use domain::model::{Assignment, MatchMode, Participant, Target, TargetPool};
pub use domain::ports::Notifier;
pub use utils::error::{Result, SantaError};
