//! Neon Snake - a terminal Snake game with persistent daily top scores
//!
//! This library provides:
//! - Core game logic: movement, collisions, food placement (game module)
//! - Food-burst particle effects (effects module)
//! - The persistent top-3 score ledger and its store (scores module)
//! - TUI rendering (render module) and keyboard input (input module)
//! - Session counters (metrics module)
//! - The interactive mode tying it together (modes module)

pub mod effects;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scores;
