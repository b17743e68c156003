//! Catalog, query and player models for the media gallery.
//!
//! Nothing in this crate touches a terminal or a process.  The front end
//! feeds user input and playback-engine events in, and renders whatever
//! these types derive.

pub mod catalog;
pub mod config;
pub mod demo;
pub mod error;
pub mod manifest;
pub mod model;
pub mod pdf;
pub mod platform;
pub mod player;
pub mod query;
pub mod selection;
pub mod surface;
