//! TUI widgets

pub mod ages;
pub mod chrome;
pub mod countries;
pub mod gender;
pub mod help;
pub mod overview;
pub mod registrations;
pub mod spinner;
pub mod tabs;
