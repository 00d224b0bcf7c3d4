pub mod annuity;
pub mod asset;
pub mod benefits;
pub mod care;
pub mod divestment;
pub mod estate;
pub mod income;
pub mod maintenance;
pub mod spousal;
pub mod timing;
pub mod trust;

pub use annuity::AnnuitySituation;
pub use asset::AssetSituation;
pub use benefits::BenefitsSituation;
pub use care::{CareLevel, CareSituation};
pub use divestment::DivestmentSituation;
pub use estate::EstateSituation;
pub use income::{IncomeDeductions, IncomeSituation};
pub use maintenance::MaintenanceSituation;
pub use spousal::SpousalSituation;
pub use timing::{ApplicantParty, TimingInputs, TimingSituation};
pub use trust::{RiskTier, TrustSituation};
