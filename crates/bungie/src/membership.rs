//! `GetMembershipsForCurrentUser` payload.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMemberships {
    #[serde(default)]
    pub destiny_memberships: Vec<DestinyMembership>,
    pub primary_membership_id: Option<String>,
    pub bungie_net_user: Option<BungieNetUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinyMembership {
    pub membership_id: String,
    pub membership_type: i16,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BungieNetUser {
    #[serde(default)]
    pub display_name: String,
}

impl UserMemberships {
    /// The primary Destiny membership, falling back to the only membership
    /// when Bungie reports no primary (single-platform accounts).
    pub fn primary(&self) -> Option<&DestinyMembership> {
        match &self.primary_membership_id {
            Some(id) => self.destiny_memberships.iter().find(|m| &m.membership_id == id),
            None if self.destiny_memberships.len() == 1 => self.destiny_memberships.first(),
            None => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.bungie_net_user.as_ref().map(|u| u.display_name.as_str())
    }
}
