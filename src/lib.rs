pub mod config;
pub mod correction;
pub mod dictionary;
pub mod engine;
pub mod keyboard;
pub mod model;
pub mod replay;
pub mod sim;
pub mod sink;
pub mod tracker;
