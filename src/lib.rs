//! A hanging rope made of point masses, re-solved once per frame.
//!
//! [`Chain::step`] advances every node but the anchor by one fixed time step
//! under gravity, damping, neighbour springs and a live external force. The
//! render transforms it leaves behind are drawn by [`render::Canvas`] or any
//! other consumer.

pub mod chain;
pub mod config;
pub mod error;
pub mod input;
pub mod node;
pub mod render;
pub mod transform;
pub mod vector;

pub use chain::Chain;
pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use input::{Controls, DragInput, MouseButton, SharedControls};
pub use node::ChainNode;
