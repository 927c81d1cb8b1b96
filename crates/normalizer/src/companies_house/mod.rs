//! Companies House registry adapter.

mod adapter;

pub use adapter::CompaniesHouseAdapter;
