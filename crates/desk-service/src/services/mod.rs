//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation, authorization, and orchestration of domain operations.

pub mod attachment;
pub mod auth;
pub mod context;
pub mod error;
pub mod ticket;

// Re-export all services for convenience
pub use attachment::{AttachmentStore, Upload};
pub use auth::{AuthService, LoginOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ticket::TicketService;
