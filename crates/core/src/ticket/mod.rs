//! Payment tickets issued by the remote auction service.

mod types;

pub use types::{Ticket, TicketStatus};
