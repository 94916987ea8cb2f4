/// Main configuration module.
///
/// Re-exports submodules for game, matchmaking, and admission configuration.
pub mod admission;
pub mod game;
pub mod matchmaking;
