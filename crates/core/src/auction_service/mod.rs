//! Auction service abstraction.
//!
//! The portal consumes the remote auction service through the
//! `AuctionService` trait: auction browsing, payment ticket issuance, ticket
//! status probes, and receipt export. The service itself (QR rendering,
//! payment matching, document generation) is not part of this codebase.

mod http;
mod types;

pub use http::HttpAuctionService;
pub use types::*;
