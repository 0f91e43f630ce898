//! powersnake - Snake with difficulty tiers, obstacles and power-ups
//!
//! This library provides:
//! - Core game rules (game module), free of any I/O
//! - Tick scheduling for the game loop (scheduler module)
//! - High-score storage (persistence module)
//! - Terminal input, rendering and play modes (input, render, modes)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
pub mod scheduler;
