use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod asteroids;
mod bodies;
mod builder;
mod config;
mod game;
mod registry;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
