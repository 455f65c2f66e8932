use crate::id::BUILDING_BASE_ID;

/// Seconds before a saved end time within which a loaded construction is
/// treated as already due.
pub const DEFAULT_GRACE_WINDOW_SECS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicConfig {
    pub grace_window_secs: i64,
    /// First building id handed out by a village.
    pub building_base_id: u32,
}

impl LogicConfig {
    pub fn new() -> Self {
        Self {
            grace_window_secs: DEFAULT_GRACE_WINDOW_SECS,
            building_base_id: BUILDING_BASE_ID,
        }
    }
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self::new()
    }
}
