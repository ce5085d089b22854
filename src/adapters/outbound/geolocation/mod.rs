mod position_stack;

pub use position_stack::{PositionStackGeolocationLookup, DEFAULT_POSITION_STACK_URL};
