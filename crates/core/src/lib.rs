//! Core business logic for Villa Ledger.
//!
//! This crate contains the domain rules with ZERO web or database dependencies.
//! Persistence is injected through the store traits; `villa-db` implements them
//! on SeaORM and [`memory::MemoryStore`] implements them in memory.
//!
//! # Modules
//!
//! - `auth` - Accounts, roles, login and three-step password recovery
//! - `ledger` - Resident profiles and payment notices, isolated per tenant
//! - `receipt` - Receipt numbering, ORIGINAL/COPY tracking, amount in words
//! - `memory` - In-memory store for tests and local runs
//! - `store` - Storage error shared by the store traits

pub mod auth;
pub mod ledger;
pub mod memory;
pub mod receipt;
pub mod store;
