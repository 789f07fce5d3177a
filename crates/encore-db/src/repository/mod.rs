//! # Repository Layer
//!
//! Repository pattern implementations for database access.
//!
//! ## Design
//! - Each repository owns a clone of the pool (pools are cheap `Arc` handles)
//! - Repositories return domain types from `encore-core`, never raw rows
//! - The checkout path only ever *reads* the catalog repository; catalog
//!   mutations exist for the external admin collaborator and for tests

pub mod booking;
pub mod catalog;

pub use booking::BookingRepository;
pub use catalog::CatalogRepository;
