#![cfg_attr(not(test), no_std)]

//! Board-independent UI core: menu model, edge input, tool shims and the
//! navigation dispatcher that routes button edges between them.

pub mod app;
pub mod input;
pub mod ir;
pub mod menu;
pub mod render;
pub mod submenu;
pub mod tools;
