use airline_shared::Masked;
use serde::{Deserialize, Serialize};

const ROLE_PREFIX: &str = "ROLE_";

/// Capability tag attached to a user. Only ever compared, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Authority tag, e.g. `ROLE_admin` or plain `admin`.
    pub rol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Role {
    pub fn new(rol: impl Into<String>) -> Self {
        Self {
            rol: rol.into(),
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.rol
    }

    /// Compares against a role name, ignoring an optional `ROLE_` prefix on either side.
    pub fn is(&self, role: &str) -> bool {
        role_name(&self.rol) == role_name(role)
    }
}

pub(crate) fn role_name(tag: &str) -> &str {
    tag.strip_prefix(ROLE_PREFIX).unwrap_or(tag)
}

/// Plaintext view of a user, as accepted on create/update and returned on read.
///
/// Reads never carry the password; there is no way back from the stored digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub nif: Masked<String>,
    pub email: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Masked<String>>,
    pub roles: Vec<Role>,
}

/// Stored form of a user: nif and email encrypted, password reduced to its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub nif_ciphertext: String,
    pub email_ciphertext: String,
    pub password_digest: String,
    pub roles: Vec<Role>,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        let wanted = role_name(role);
        self.roles.iter().any(|r| role_name(r) == wanted)
    }
}

impl From<&UserRecord> for Principal {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            roles: record.roles.iter().map(|r| r.authority().to_string()).collect(),
        }
    }
}
