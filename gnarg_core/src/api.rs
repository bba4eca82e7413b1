mod capture;
mod field;
mod option;

pub use capture::*;
pub use field::*;
pub use option::*;
