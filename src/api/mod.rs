//! HTTP API module for the quote costing engine.
//!
//! A thin JSON adapter over the costing functions in
//! [`crate::calculation`]. Decimals travel as strings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AggregateLaborRequest, PriceQuoteRequest, QuoteTotalsRequest, ShiftCostQuery,
    SubcontractorCostRequest,
};
pub use response::{ApiError, SubcontractorCostResponse};
pub use state::AppState;
