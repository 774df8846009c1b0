//! Integration tests for Marquee
//!
//! These tests run the real HTTP catalog client and search session against an
//! in-process fake catalog server, checking request shape, response mapping
//! and the ordering of concurrent fetches end to end.

#[path = "integration/fake_catalog.rs"]
mod fake_catalog;

#[path = "integration/catalog_client.rs"]
mod catalog_client;
#[path = "integration/search_session.rs"]
mod search_session;
