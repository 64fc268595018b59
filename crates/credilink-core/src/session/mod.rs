//! Session domain module.
//!
//! This module contains the session domain model, the store interface,
//! notifications, and the session manager.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `UserRole`, `ProfileUpdate`)
//! - `repository`: Store trait for session persistence (`SessionStore`)
//! - `event`: Transient notifications (`SessionEvent`)
//! - `manager`: Session lifecycle management (`SessionManager`)
//!
//! # Usage
//!
//! ```ignore
//! use credilink_core::session::{Session, SessionManager, SessionStore, UserRole};
//! ```

mod event;
mod manager;
mod model;
mod repository;

// Re-export public API
pub use event::SessionEvent;
pub use manager::{SessionManager, SessionSettings};
pub use model::{OAuthProvider, ProfileUpdate, Session, UserRole};
pub use repository::SessionStore;
