//! # encore-db: Database Layer for Encore Booking
//!
//! This crate provides database access for the booking engine.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Encore Booking Data Flow                        │
//! │                                                                     │
//! │  CheckoutService (booking-api)                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    encore-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │  ┌─────────────┐   ┌──────────────────┐   ┌───────────────┐  │  │
//! │  │  │  Database   │   │   Repositories   │   │  Migrations   │  │  │
//! │  │  │  (pool.rs)  │   │                  │   │  (embedded)   │  │  │
//! │  │  │             │   │ CatalogRepo (ro) │   │               │  │  │
//! │  │  │ SqlitePool  │◄──│ BookingRepo      │   │ 001_init.sql  │  │  │
//! │  │  └─────────────┘   └──────────────────┘   └───────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database (WAL mode)                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, booking)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use encore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/encore.db")).await?;
//! let item = db.catalog().get_by_id("uuid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::booking::BookingRepository;
pub use repository::catalog::CatalogRepository;
