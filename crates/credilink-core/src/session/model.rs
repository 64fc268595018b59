//! Session domain model.
//!
//! This module contains the `Session` entity representing the logged-in
//! identity, the role it was created with, and the restricted update type
//! used to edit its profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::wallet::{WalletConnector, truncate_address};

/// Role chosen at signup. Fixed for the lifetime of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum UserRole {
    #[strum(to_string = "Student")]
    Student,
    #[strum(to_string = "Recruiter")]
    Recruiter,
}

impl UserRole {
    /// Lowercase form used in user-facing sentences ("as a student").
    pub const fn as_noun(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Recruiter => "recruiter",
        }
    }
}

/// OAuth identity providers offered next to wallet login.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OAuthProvider {
    Google,
    Github,
}

/// The locally held record of the current logged-in identity.
///
/// Identity fields (`id`, `address`, `role`, `created_at`, `is_verified`) are
/// private: they are set by the constructors and never change afterwards.
/// Profile fields are public and edited through [`ProfileUpdate`].
///
/// Serialized with camelCase keys. Fields added after the first release
/// default when absent so older stored records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Wallet address, or `{provider}_{millis}` for OAuth sessions
    id: String,
    /// Wallet address, empty for OAuth sessions
    #[serde(default)]
    address: String,
    /// Reverse-resolved name for `address`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ens_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Display name
    pub name: String,
    role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    /// Recruiter profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Student profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    is_verified: bool,
    created_at: DateTime<Utc>,
    /// Connector id the wallet session was opened with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wallet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain_id: Option<u64>,
}

impl Session {
    /// Builds an unverified session for a connected wallet.
    ///
    /// The display name is the resolved name when there is one, otherwise
    /// the role followed by the shortened address.
    pub fn from_wallet(
        address: String,
        ens_name: Option<String>,
        role: UserRole,
        connector: WalletConnector,
        chain_id: Option<u64>,
    ) -> Self {
        let name = match ens_name.as_deref() {
            Some(ens) if !ens.is_empty() => ens.to_string(),
            _ => format!("{} {}", role, truncate_address(&address)),
        };

        Self {
            id: address.clone(),
            address,
            ens_name,
            email: None,
            name,
            role,
            avatar: None,
            bio: None,
            skills: None,
            company: None,
            experience: None,
            is_verified: false,
            created_at: Utc::now(),
            wallet_type: Some(connector.to_string()),
            chain_id,
        }
    }

    /// Builds the placeholder identity for a mocked OAuth login.
    pub fn from_oauth(provider: OAuthProvider, role: UserRole, avatar_base_url: &str) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}_{}", provider, created_at.timestamp_millis()),
            address: String::new(),
            ens_name: None,
            email: Some(format!("user@{}.com", provider)),
            name: format!("{} User", provider),
            role,
            avatar: Some(format!("{}?seed={}", avatar_base_url, provider)),
            bio: None,
            skills: None,
            company: None,
            experience: None,
            is_verified: true,
            created_at,
            wallet_type: None,
            chain_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn ens_name(&self) -> Option<&str> {
        self.ens_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn wallet_type(&self) -> Option<&str> {
        self.wallet_type.as_deref()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Whether this session was opened through a wallet.
    pub fn is_wallet_session(&self) -> bool {
        !self.address.is_empty()
    }

    /// Merges a profile update, keeping every field the update leaves out.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            name,
            avatar,
            bio,
            skills,
            company,
            experience,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if avatar.is_some() {
            self.avatar = avatar;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if skills.is_some() {
            self.skills = skills;
        }
        if company.is_some() {
            self.company = company;
        }
        if experience.is_some() {
            self.experience = experience;
        }
    }

    pub(crate) fn set_chain_id(&mut self, chain_id: u64) {
        self.chain_id = Some(chain_id);
    }
}

/// Partial profile edit.
///
/// Carries no `id` or `role`, and rejects those keys when deserialized,
/// so a profile edit can never change who the session belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
