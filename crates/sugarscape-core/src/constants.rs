/// Largest valid grid dimension (cells per side). Keeps the cell count and
/// the worst-case capacity sum comfortably inside integer range.
pub const MAX_GRID_SIZE: usize = 1024;
