pub mod common;
pub mod config;
pub mod graph;
pub mod log;
pub mod v1_0_2;
pub mod v1_0_3;

pub use common::*;
pub use config::*;
pub use graph::SpecSite;
pub use log::*;
