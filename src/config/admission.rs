/// Configuration for connection admission control.
/// All values are counts per window or seconds.
pub const MAX_ADMISSIONS_PER_WINDOW: u32 = 100;
pub const ADMISSION_WINDOW_SECS: u64 = 60;
