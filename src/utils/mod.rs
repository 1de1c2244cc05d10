pub mod clock;
pub mod entropy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entropy::{Entropy, SeededEntropy, ThreadEntropy};
