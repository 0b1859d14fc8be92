//! SeaORM entities.

pub mod registered_account;
