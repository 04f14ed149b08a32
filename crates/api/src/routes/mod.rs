//! Route Handlers

pub mod recommendations;
