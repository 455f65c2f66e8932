mod clock;
mod construction;
mod context;
mod pool;
mod timers;
mod village;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{ConstructionContext, TownHallSnapshot};
pub use pool::ObjectPool;
pub use timers::{DueTimer, TimerHandle, TimerQueue};
pub use village::Village;
