#![doc = include_str!("../../../README.md")]

pub mod alias_planner;
pub mod assembler;
pub mod config;
pub mod discovery;
pub mod orchestrator;
pub mod output;
pub mod payload;
pub mod resolver;
pub mod transformer;
pub mod types;
