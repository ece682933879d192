//! Clock adapters.
//!
//! - `SystemClock` - Wall clock with the machine's local calendar
//! - `ManualClock` - Hand-driven clock for tests and simulations

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
