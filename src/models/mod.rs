mod lead;
mod payment;

pub use lead::*;
pub use payment::*;
