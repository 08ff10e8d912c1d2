// Domain layer - Value types with no I/O
pub mod thresholds;
pub mod trend;
pub mod vitals;
