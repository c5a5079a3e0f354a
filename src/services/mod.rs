pub mod amount;
pub mod gateway;
pub mod mapping;
pub mod provider;

pub use amount::Amount;
pub use gateway::ChargeGateway;
pub use mapping::{FieldMapping, ResponseVersion};
pub use provider::{PixProvider, PushinPayClient};
