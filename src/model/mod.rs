pub mod cabinet;
pub mod medicine;
pub mod settings;
pub mod tag;

pub use cabinet::*;
pub use medicine::*;
pub use settings::*;
pub use tag::*;
