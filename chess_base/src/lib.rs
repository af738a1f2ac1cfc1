//! # Base types for rookwise
//!
//! This is an auxiliary crate for `rookwise`, which contains the plain value types: squares,
//! colors, pieces, castling rights and position sets.
//!
//! Normally you don't want to use this crate directly. Use `rookwise` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
