//! Spatial structures: point indexing and hex tilings

/// Axial hex lattice with cyclic-dominance updates
pub mod hex;
/// Region quadtree for point queries
pub mod quadtree;
