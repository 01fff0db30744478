use serde::{Deserialize, Serialize};

/// Per-space visibility setting.
///
/// `community` is the only value that lets the public-viewer sentinel read a
/// space; `private` restricts access to bound subjects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Community,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Community => write!(f, "community"),
        }
    }
}

/// A provisioned tenant workspace resource.
///
/// Lifecycle is owned by the provisioning system; this service only reads
/// spaces and patches their visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub name: String,
    pub namespace: String,
    /// MUR name of the user the space was provisioned for
    pub creator: String,
    /// Tier determining the role catalog available on this space
    pub tier_name: String,
    /// Bindings on the parent space (and its ancestors) apply here too
    pub parent_space: Option<String>,
    /// Visibility embedded on the space itself; older storage generation,
    /// superseded by the SpaceUserConfig side record when one exists
    pub visibility: Visibility,
}

/// An edge granting a subject (MUR name) a role on a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceBinding {
    pub mur_name: String,
    pub space_name: String,
    pub role: String,
}

/// Side record holding the user-mutable visibility setting for a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceUserConfig {
    pub space_name: String,
    pub visibility: Visibility,
}

/// Tier definition carrying the role catalog available on a space.
///
/// Used only to annotate workspace projections, never to re-derive
/// authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NSTemplateTier {
    pub name: String,
    pub space_roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Visibility::Community).unwrap(),
            "\"community\""
        );
        let parsed: Visibility = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(parsed, Visibility::Private);
    }

    #[test]
    fn test_visibility_rejects_unknown_value() {
        let result = serde_json::from_str::<Visibility>("\"internal\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_visibility_default_is_private() {
        assert_eq!(Visibility::default(), Visibility::Private);
    }
}
