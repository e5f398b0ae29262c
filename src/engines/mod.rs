mod clock;
mod signage;

pub use clock::ClockEngine;
pub use signage::SignageEngine;
