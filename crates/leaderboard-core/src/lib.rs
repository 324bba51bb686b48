// Library root: the backend client, refresh workflow and orchestrator that
// the dashboard binary drives. Everything here is UI-agnostic.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod cookies;
pub mod model;
pub mod protocol;
pub mod refresh;
pub mod view;

#[cfg(test)]
mod test_support;
