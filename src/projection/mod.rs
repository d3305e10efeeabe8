//! Projection engine for yearly retirement balance projections

mod state;
mod engine;
mod cashflows;
mod annuity;

pub use state::ProjectionState;
pub use engine::{project, ProjectionEngine};
pub use cashflows::{first_depleted_year, ProjectionResult, ProjectionSummary, YearRecord};
pub use annuity::{
    future_value, living_annuity_income, real_value, sustainable_withdrawal, AnnuityIncome,
};
