// Scholarship eligibility: dataset loading, the eligibility filter, and the
// HTTP handler that exposes it.

pub mod filter;
pub mod handlers;
pub mod loader;
pub mod models;
