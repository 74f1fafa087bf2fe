/// Capabilities held by accounts. Stored per `(Role, AccountId)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Role {
    /// Grants and revokes every role, itself included.
    DefaultAdmin,
    /// Runs the fee, limit, blacklist, exemption and pause controls.
    Admin,
}

impl Role {
    /// The role whose holders may grant or revoke `self`.
    pub fn admin_role(self) -> Role {
        match self {
            Role::DefaultAdmin | Role::Admin => Role::DefaultAdmin,
        }
    }
}
