//! Bloombox runtime: page acquisition, headless rendering, CLI and HTTP
//! surfaces around the `bloombox-signals` pipeline.

pub mod acquisition;
pub mod audit;
pub mod cli;
pub mod config;
pub mod logging;
pub mod renderer;
pub mod server;
