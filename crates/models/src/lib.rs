//! sea-orm entities for the catalog tables and connection helpers.

pub mod db;
pub mod catalog;
pub mod product;
pub mod cat_toy;
