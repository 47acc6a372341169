pub mod records;
pub mod source;

pub use records::{AmenityType, FloorplanRecords, LandmarkKind, LandmarkRecord};
pub use source::FloorplanSource;
