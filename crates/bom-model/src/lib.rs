pub mod enums;
pub mod item;
pub mod statistics;

pub use enums::LifecycleStage;
pub use item::{Blocker, ERP_ACTIVATED, Flag, Item};
pub use statistics::{LifecycleDistribution, ProjectStatistics};
