//! Reconstruction algorithms: stitching, branch discovery, network assembly.

pub mod branch;
pub mod network;
pub mod stitch;

#[cfg(test)]
mod tests;

pub use branch::{BranchInsertion, BranchQuery, MeshBranchQuery, locate_branches};
pub use network::{CanonicalPoint, Network, NetworkEdge, assemble_network};
pub use stitch::{Chain, Group, stitch_curves, stitch_groups};
