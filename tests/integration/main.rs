#[path = "../common/mod.rs"]
mod common;

mod vehicle_tests;
