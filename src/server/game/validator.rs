use serde_json::Value;

use crate::config::game::GRID_SIZE;
use crate::server::error::GameError;

/// Check move coordinates against the board bounds.
///
/// Coordinates arrive as raw JSON values; anything that is not an integer
/// JSON number in `[0, GRID_SIZE)` is a validation error. Whether the
/// target cell is free is checked later, against the session's board.
pub fn validate_coords(row: &Value, col: &Value) -> Result<(usize, usize), GameError> {
    match (coord(row), coord(col)) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(GameError::validation("Invalid move coordinates")),
    }
}

fn coord(value: &Value) -> Option<usize> {
    let n = value.as_i64()?;
    if (0..GRID_SIZE as i64).contains(&n) {
        Some(n as usize)
    } else {
        None
    }
}
