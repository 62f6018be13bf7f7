pub mod contacts;
pub mod parser;
pub mod progress;
