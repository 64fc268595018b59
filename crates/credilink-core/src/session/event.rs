use serde::{Deserialize, Serialize};

use super::model::{OAuthProvider, UserRole};
use crate::wallet::chain_label;

/// Transient notifications published by the session manager.
///
/// These are the "toasts" of the login flow: consumers display them and
/// move on. State itself is observed through the session watch channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    LoggedIn {
        session_id: String,
        role: UserRole,
        #[serde(default)]
        oauth: Option<OAuthProvider>,
    },
    LoginFailed {
        #[serde(default)]
        oauth: Option<OAuthProvider>,
        reason: String,
    },
    LoggedOut,
    ProfileUpdated {
        session_id: String,
    },
    ChainSwitched {
        chain_id: u64,
    },
    ChainSwitchFailed {
        chain_id: u64,
        reason: String,
    },
}

impl SessionEvent {
    pub fn title(&self) -> &'static str {
        match self {
            Self::LoggedIn { .. } => "Login Successful!",
            Self::LoginFailed { oauth: None, .. } => "Login Failed",
            Self::LoginFailed { oauth: Some(_), .. } => "OAuth Login Failed",
            Self::LoggedOut => "Logged Out",
            Self::ProfileUpdated { .. } => "Profile Updated",
            Self::ChainSwitched { .. } => "Network Switched",
            Self::ChainSwitchFailed { .. } => "Network Switch Failed",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::LoggedIn {
                role, oauth: None, ..
            } => format!("Welcome to CrediLink+ as a {}!", role.as_noun()),
            Self::LoggedIn {
                oauth: Some(provider),
                ..
            } => format!("Welcome to CrediLink+ via {}!", provider),
            Self::LoginFailed { reason, .. } => reason.clone(),
            Self::LoggedOut => "You have been successfully logged out.".to_string(),
            Self::ProfileUpdated { .. } => {
                "Your profile has been updated successfully.".to_string()
            }
            Self::ChainSwitched { chain_id } => {
                format!("Now connected to {}.", chain_label(*chain_id))
            }
            Self::ChainSwitchFailed { reason, .. } => reason.clone(),
        }
    }

    /// Failures are shown with the destructive style.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::LoginFailed { .. } | Self::ChainSwitchFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_messages() {
        let wallet = SessionEvent::LoggedIn {
            session_id: "0xabc".to_string(),
            role: UserRole::Student,
            oauth: None,
        };
        assert_eq!(wallet.description(), "Welcome to CrediLink+ as a student!");
        assert!(!wallet.is_error());

        let failed = SessionEvent::LoginFailed {
            oauth: Some(OAuthProvider::Google),
            reason: "cancelled".to_string(),
        };
        assert_eq!(failed.title(), "OAuth Login Failed");
        assert!(failed.is_error());
    }

    #[test]
    fn test_event_tagging() {
        let json = serde_json::to_value(SessionEvent::ChainSwitched { chain_id: 137 }).unwrap();
        assert_eq!(json["type"], "chain_switched");
        assert_eq!(json["chain_id"], 137);
    }
}
