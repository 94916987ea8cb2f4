/// Matchmaking configuration constants.
///
/// This module defines parameters for opponent search, such as the
/// auto-search delay after connect and the waiting-list timeout.
pub const AUTO_FIND_DELAY_SECS: u64 = 1; // Delay after connect before auto-search starts (in seconds).

/// Time (in seconds) a player stays on the waiting list before the
/// search is abandoned and a timeout notice is sent.
pub const SEARCH_TIMEOUT_SECS: u64 = 10;
