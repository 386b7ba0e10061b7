pub mod calc;
pub mod cost;
pub mod med_ops;
pub mod schedule;
pub mod stock;
pub mod tag_ops;
