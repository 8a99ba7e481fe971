mod address_finder;
mod budget_planner;
mod instruction_builders;

pub use address_finder::AddressFinder;
pub use budget_planner::*;
pub use instruction_builders::*;
pub use pulse_rewards::state::*;

// Re-export program ID
pub use pulse_rewards::ID as PROGRAM_ID;
