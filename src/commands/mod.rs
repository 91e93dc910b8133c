// Command implementations for the hookreg CLI

pub mod plan;
pub mod sample_config;
pub mod show;
pub mod validate;
pub mod verify_pins;
