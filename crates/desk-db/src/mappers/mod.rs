//! Model to entity mappers
//!
//! Rows are converted into domain objects with `TryFrom`, since stored text
//! (roles, attachment names) is validated on the way in.

mod session;
mod ticket;
mod user;
