mod assistant;
mod classify;
mod extract;
mod ledger;
mod message;
mod money;

pub use assistant::*;
pub use classify::*;
pub use extract::*;
pub use ledger::*;
pub use message::*;
pub use money::*;
