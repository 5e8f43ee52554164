#[macro_use]
extern crate diesel;

pub mod auth;
pub mod census;
pub mod config;
pub mod db;
pub mod error;
pub mod favorites;
pub mod models;
pub mod module;
pub mod news;
pub mod records;
pub mod schema;
#[cfg(test)]
mod testing;
pub mod trees;
pub mod web;

include!(concat!(env!("OUT_DIR"), "/templates.rs"));
