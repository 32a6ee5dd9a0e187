mod lib;
mod node;

pub use lib::Lib;
pub use node::{Node, NodeType};
