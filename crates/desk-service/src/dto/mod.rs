//! Data transfer objects for requests and page documents
//!
//! This module provides:
//! - Request DTOs with validation for form inputs
//! - Response DTOs describing rendered pages
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    validate_request, CreateTicketRequest, LoginRequest, RegisterRequest, UpdateStatusRequest,
};

pub use responses::{
    AdminPage, AdminTicketResponse, DashboardPage, FormPage, HealthChecks, HealthResponse,
    ReadinessResponse, TicketResponse, UserSummary,
};
