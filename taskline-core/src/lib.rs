//! taskline-core: priority classification and workday scheduling engine

pub mod classifier;
pub mod intake;
pub mod scheduler;
pub mod task;
pub mod time;
pub mod timeline;
pub mod workday;

pub use classifier::{classify, due_date_urgency, Classification};
pub use intake::{create_task, TaskDraft};
pub use scheduler::{schedule, ScheduledTask};
pub use task::{Priority, Task, TaskStatus};
pub use timeline::{group_by_day, span, summarize, TimelineDay, TimelineSummary};
