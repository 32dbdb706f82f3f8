pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod generator;
pub mod line;
pub mod model;
pub mod package;
pub mod parsers;
pub mod report;
pub mod xml;
