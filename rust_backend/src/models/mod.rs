pub mod lookup;
pub mod phase;

pub use lookup::*;
pub use phase::*;
