pub mod config;
pub mod dealer;
pub mod display;
pub mod models;
pub mod patterns;
pub mod predictor;
pub mod session;
