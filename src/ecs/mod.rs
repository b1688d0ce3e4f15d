//! hecs integration: components the simulation reads and writes.

pub mod components;

pub mod prelude {
    pub use super::components::*;
}
