#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
pub mod graph;
pub mod hash_map;
pub mod red_black_tree;
