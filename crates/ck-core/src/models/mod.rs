pub mod contract;
pub mod legacy;
pub mod migration;
pub mod payment;

pub use contract::*;
pub use legacy::*;
pub use migration::*;
pub use payment::*;
