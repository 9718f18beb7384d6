//! Nego Market - flea-market backend with seller-reviewed price negotiation.
//!
//! Buyers chat with sellers about a listing. When a seller enables AI
//! negotiation, each buyer message produces a reply draft that the seller
//! approves, rejects, or regenerates before the buyer sees anything.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
