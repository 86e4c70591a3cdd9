//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod backend;
pub mod chat_view;
pub mod credential_store;
pub mod reveal_pacer;
