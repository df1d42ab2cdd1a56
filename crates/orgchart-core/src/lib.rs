//! Hierarchy graph decomposition for organizational charts.
//!
//! Resolves a multi-parent unit/role hierarchy ([`builder::GraphBuilder`]) and
//! decomposes it into root-ward paths, connected groups, root candidates and
//! layout ranks ([`decompose::Decomposition`]).

pub mod builder;
pub mod config;
pub mod decompose;
pub mod document;
pub mod groups;
pub mod layout;
pub mod model;
pub mod paths;
pub mod rank;
pub mod roots;
pub mod source;
pub mod storage;
