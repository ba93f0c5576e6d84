//! `SeaORM` entity definitions.

pub mod accounts;
pub mod personnel;
pub mod transactions;
