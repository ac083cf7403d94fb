pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod input;
pub mod level;
pub mod movers;
pub mod physics;
pub mod player;
pub mod render;
