//! Connectivity helpers shared by the reconstruction algorithms.

pub mod union_find;

pub use union_find::UnionFind;
