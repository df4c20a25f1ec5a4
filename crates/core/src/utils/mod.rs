pub mod money;
pub mod period;

pub use money::{is_balanced, round_money};
pub use period::Period;
