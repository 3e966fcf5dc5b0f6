#![cfg_attr(not(test), no_std)]

//! Chip-agnostic board drivers for the navigation core: input surfaces, IR capture,
//! and the TFT renderer.

pub mod input;
pub mod ir;
pub mod platform;
pub mod render;
