pub mod questions;
pub mod run;
pub mod themes;
