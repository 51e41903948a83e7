mod fleet;
mod simulator;

pub use fleet::Fleet;
pub use simulator::Simulator;
