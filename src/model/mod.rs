pub mod category;
pub mod table;

pub use category::{Category, Granularity};
pub use table::{Column, Table, Value, LEAGUE, PLAYER, SQUAD};
