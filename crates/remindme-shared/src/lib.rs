//! # RemindMe Shared
//!
//! Wire types shared by the server and its clients: request/response DTOs and
//! the JSON envelopes every endpoint answers with.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorDetail, ErrorResponse, ErrorType};
