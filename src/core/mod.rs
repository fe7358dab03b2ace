pub mod aggregator;

pub use crate::domain::model::{ErrorRecord, LoginList, Lookup, UserProfile, USER_NOT_FOUND};
pub use crate::domain::ports::{ConfigProvider, UserDirectory};
pub use crate::utils::error::Result;
