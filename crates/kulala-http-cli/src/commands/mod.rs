pub mod check;
pub mod info;
pub mod node_types;
pub mod requests;
pub mod source;
pub mod tree;
