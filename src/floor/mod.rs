pub mod level;
pub mod overlay;
pub mod set;

pub use level::{Floor, TransientDelta};
pub use overlay::FloorOverlay;
pub use set::FloorSet;
