/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as grid dimensions
/// and username bounds.
pub const GRID_SIZE: usize = 3; // The board is GRID_SIZE x GRID_SIZE cells.

/// Minimum username length accepted at registration.
pub const USERNAME_MIN_LEN: usize = 3;

/// Maximum username length accepted at registration.
pub const USERNAME_MAX_LEN: usize = 20;
