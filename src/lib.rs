//! ltip-advisor: Long-Term Incentive Plan survey with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
