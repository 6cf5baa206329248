use std::path::PathBuf;

use crate::server::{
    config::Config,
    model::route::{Location, RouteTable, Target},
};

mod resolve;
mod slash_redirect;

fn foodgram_table() -> RouteTable {
    let config = Config::from_lookup(|_| None).unwrap();
    RouteTable::foodgram(&config)
}

fn prefix_of(table: &RouteTable, path: &str) -> Option<String> {
    table.resolve(path).map(|m| m.location.prefix.clone())
}
