pub mod client;
pub mod financial;

pub use client::{ClientProfile, Dependent, HealthStatus, MaritalStatus, SpouseProfile};
pub use financial::{AssetTransfer, FinancialProfile, RawFinancialProfile, TransferRecipient};
