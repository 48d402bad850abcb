//! Signed-in identity.
//!
//! The federated login flow itself belongs to the external identity
//! provider; this layer only ever sees the principal it produced.
//! Signing out is purely client-side — the caller drops the principal.

use serde::{Deserialize, Serialize};

/// The principal issued by the identity provider after sign-in.
///
/// Used to stamp evaluator fields on signoff records and to test owner
/// membership. Fields default to empty so a partially-populated
/// identity (no display name, say) still round-trips.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: String::new(),
        }
    }
}
