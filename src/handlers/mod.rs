// handlers/mod.rs - Handler tiers
//
// Public (no auth) -> Protected (Basic auth)
pub mod protected;
pub mod public;
