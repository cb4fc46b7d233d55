//! DTOs returned to the table widget.

pub mod response;
