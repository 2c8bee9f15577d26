pub mod config;
pub mod fetch;
pub mod gpa;
pub mod output;
pub mod parser;
