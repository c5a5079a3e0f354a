pub mod charge;
pub mod response;

pub use charge::*;
pub use response::*;
