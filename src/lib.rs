//! HalTalks Library
//!
//! Core modules for the HalTalks conversational terminal.

pub mod agent;
pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod gui;
pub mod terminal;
pub mod tts;
