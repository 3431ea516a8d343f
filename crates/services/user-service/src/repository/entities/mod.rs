//! SeaORM entity definitions, separate from domain models.

pub mod user;
