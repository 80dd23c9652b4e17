//! HTTP API module for the Workday Balance Engine.
//!
//! This module provides the REST endpoints that turn submitted timesheet
//! records into daily and monthly balances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MonthlyBalanceRequest, MonthsRequest, WorkdayRequest};
pub use response::{ApiError, ApiErrorResponse, DailyBalanceResponse, MonthsResponse};
pub use state::AppState;
