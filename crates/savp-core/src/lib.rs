//! Core chart model for SAVP dispositor analysis.
//!
//! Provides bodies and signs ([`zodiac`]), rulership tables, essential
//! dignities and weighting, aspect detection, the Tree of Life projection,
//! chart snapshot persistence, and configuration.

pub mod aspects;
pub mod chart;
pub mod config;
pub mod dignity;
pub mod error;
pub mod rulership;
pub mod tree;
pub mod zodiac;
