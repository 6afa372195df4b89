//! Member access levels
//!
//! Describes the visibility of a method and the set of visibilities a
//! signature pattern accepts.

use serde::{Deserialize, Serialize};

/// Access level of a method declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Visible to everyone
    #[default]
    Public,
    /// Visible to the declaring type and its subtypes
    Protected,
    /// Visible inside the defining module only
    Internal,
    /// Visible to the declaring type only
    Private,
}

impl Access {
    const fn bit(self) -> u8 {
        match self {
            Self::Public => 0b0001,
            Self::Protected => 0b0010,
            Self::Internal => 0b0100,
            Self::Private => 0b1000,
        }
    }

    /// Whether a method with this access level can ever be intercepted
    ///
    /// Only public and protected members are reachable through a proxy.
    #[must_use]
    pub const fn is_interceptable(self) -> bool {
        matches!(self, Self::Public | Self::Protected)
    }
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
            Self::Internal => write!(f, "internal"),
            Self::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for Access {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "internal" => Ok(Self::Internal),
            "private" => Ok(Self::Private),
            _ => Err(format!(
                "Invalid access level: {s}. Use: public, protected, internal, private"
            )),
        }
    }
}

/// A set of access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessMask(u8);

impl AccessMask {
    /// Accepts no access level (a pattern carrying it matches nothing)
    pub const NONE: Self = Self(0);

    /// Accepts every access level
    pub const ALL: Self = Self(0b1111);

    /// Accepts public members only
    pub const PUBLIC: Self = Self(Access::Public.bit());

    /// Accepts public and protected members
    pub const PUBLIC_PROTECTED: Self = Self(Access::Public.bit() | Access::Protected.bit());

    /// Mask accepting exactly one access level
    #[must_use]
    pub const fn only(access: Access) -> Self {
        Self(access.bit())
    }

    /// Add an access level to the mask
    #[must_use]
    pub const fn with(self, access: Access) -> Self {
        Self(self.0 | access.bit())
    }

    /// Whether the mask accepts the given access level
    #[must_use]
    pub const fn contains(self, access: Access) -> bool {
        self.0 & access.bit() != 0
    }

    /// Whether the mask accepts nothing
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for AccessMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<Access> for AccessMask {
    fn from_iter<T: IntoIterator<Item = Access>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl std::fmt::Display for AccessMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::ALL {
            return write!(f, "all");
        }
        let names: Vec<String> = [Access::Public, Access::Protected, Access::Internal, Access::Private]
            .into_iter()
            .filter(|a| self.contains(*a))
            .map(|a| a.to_string())
            .collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}
