pub mod browser;
pub mod cli;
pub mod error;
pub mod harness;
pub mod pages;
pub mod report;
pub mod scenarios;
pub mod support;
pub mod trace;
