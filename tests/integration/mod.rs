pub mod matcher;
pub mod runner;
pub mod scenarios;
