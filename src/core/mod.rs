pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod converter;
pub mod geo;
