pub mod admin;
pub mod buy_ticket;
pub mod choose_winner;
pub mod reclaim;
pub mod refund;

pub use admin::*;
pub use buy_ticket::*;
pub use choose_winner::*;
pub use reclaim::*;
pub use refund::*;
