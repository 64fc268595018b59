//! Session store trait.
//!
//! Defines the interface for persisting the single active session.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract single-slot store for the active session.
///
/// Only one session is ever stored; `save` replaces whatever was there.
/// There is no schema versioning: implementations hand back whatever
/// record they hold, and report records they cannot parse as
/// serialization errors.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: A session is stored
    /// - `Ok(None)`: The slot is empty
    /// - `Err(_)`: The slot could not be read or parsed
    async fn load(&self) -> Result<Option<Session>>;

    /// Replaces the stored session.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Empties the slot. Succeeds when it is already empty.
    async fn clear(&self) -> Result<()>;
}
