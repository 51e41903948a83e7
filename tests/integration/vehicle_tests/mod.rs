mod config;
mod properties;
mod simulation;
