/// Discrete request collected between cycles and applied at the start of the next one.
///
/// Each action takes effect at two points: on the control side, which owns
/// play state and redraw mode, and in the simulation, which owns the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Play/pause the simulation
    TogglePlay,
    /// Reset the grid to empty
    Clear,
    /// Adopt the current drawable size
    Resize,
}
