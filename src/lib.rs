//! # Shape Connect
//!
//! A dual-attribute Connect Four variant: every piece has an owner color and
//! a shape (circle, square, triangle, diamond), and four in a row of EITHER
//! attribute wins — four same-colored pieces of any shapes, or four
//! same-shaped pieces of any colors.
//!
//! This crate is the game core. Rendering, input handling, and turn pacing
//! belong to whatever front end drives it (the bundled binary is a plain
//! text-mode loop).
//!
//! ## Modules
//!
//! - [`game`] — Board, gravity placement, dual-condition win detection,
//!   session state
//! - [`ai`] — The computer player: one-ply win/block/random heuristic
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
