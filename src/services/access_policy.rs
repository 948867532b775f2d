//! Per-resource permission rules
//!
//! | Resource                  | Read            | Write                              |
//! |---------------------------|-----------------|------------------------------------|
//! | Category, Product, Coupon | anyone          | anyone, or staff when restricted   |
//! | Address, Wishlist         | owner           | owner                              |
//! | Order                     | owner or staff  | create: authenticated; else owner or staff |
//! | Review                    | anyone          | create: authenticated; else owner or staff |
//! | User                      | anyone          | never                              |

use crate::config::AccessConfig;
use crate::error::{AppError, AppResult};
use crate::models::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    Product,
    Coupon,
    Address,
    Wishlist,
    Order,
    Review,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Which rows a list query may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    OwnedBy(i64),
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    restrict_catalog_writes: bool,
}

fn require(identity: Option<&Identity>) -> AppResult<&Identity> {
    identity.ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
}

impl AccessPolicy {
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            restrict_catalog_writes: config.restrict_catalog_writes,
        }
    }

    pub fn restricts_catalog_writes(&self) -> bool {
        self.restrict_catalog_writes
    }

    /// Checks `action` on `resource`. `owner_id` is the owning identity of the
    /// addressed row, when there is one.
    pub fn authorize(
        &self,
        identity: Option<&Identity>,
        resource: Resource,
        action: Action,
        owner_id: Option<i64>,
    ) -> AppResult<()> {
        match (resource, action) {
            (Resource::Category | Resource::Product | Resource::Coupon, Action::Read) => Ok(()),
            (Resource::Category | Resource::Product | Resource::Coupon, _) => {
                if !self.restrict_catalog_writes {
                    return Ok(());
                }
                if require(identity)?.is_staff {
                    Ok(())
                } else {
                    Err(AppError::PermissionDenied)
                }
            }
            (Resource::User, Action::Read) => Ok(()),
            (Resource::User, _) => Err(AppError::PermissionDenied),
            (Resource::Review, Action::Read) => Ok(()),
            (Resource::Review | Resource::Order, Action::Create) => require(identity).map(|_| ()),
            (Resource::Review | Resource::Order, _) => {
                let caller = require(identity)?;
                match owner_id {
                    Some(owner) if caller.owns(owner) || caller.is_staff => Ok(()),
                    _ => Err(AppError::PermissionDenied),
                }
            }
            (Resource::Address | Resource::Wishlist, Action::Create) => {
                require(identity).map(|_| ())
            }
            (Resource::Address | Resource::Wishlist, _) => {
                let caller = require(identity)?;
                match owner_id {
                    Some(owner) if caller.owns(owner) => Ok(()),
                    _ => Err(AppError::PermissionDenied),
                }
            }
        }
    }

    /// Whether the caller may even learn that the row exists. Rows outside a
    /// caller's scope are reported as not found rather than forbidden.
    pub fn can_see(&self, identity: Option<&Identity>, resource: Resource, owner_id: i64) -> bool {
        self.authorize(identity, resource, Action::Read, Some(owner_id))
            .is_ok()
    }

    /// Row scope for list endpoints. `want_all` is an explicit request for
    /// every owner's rows, which only staff may make.
    pub fn list_scope(
        &self,
        identity: Option<&Identity>,
        resource: Resource,
        want_all: Option<bool>,
    ) -> AppResult<ListScope> {
        match resource {
            Resource::Order => {
                let caller = require(identity)?;
                match want_all {
                    Some(true) if !caller.is_staff => Err(AppError::PermissionDenied),
                    Some(false) => Ok(ListScope::OwnedBy(caller.id)),
                    _ if caller.is_staff => Ok(ListScope::All),
                    _ => Ok(ListScope::OwnedBy(caller.id)),
                }
            }
            Resource::Address | Resource::Wishlist => {
                Ok(ListScope::OwnedBy(require(identity)?.id))
            }
            _ => Ok(ListScope::All),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> Identity {
        Identity {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            is_staff: false,
        }
    }

    fn staff(id: i64) -> Identity {
        Identity {
            is_staff: true,
            ..user(id)
        }
    }

    fn open() -> AccessPolicy {
        AccessPolicy::default()
    }

    fn restricted() -> AccessPolicy {
        AccessPolicy::new(&AccessConfig {
            restrict_catalog_writes: true,
        })
    }

    #[test]
    fn test_catalog_open_by_default() {
        for resource in [Resource::Category, Resource::Product, Resource::Coupon] {
            assert!(open().authorize(None, resource, Action::Read, None).is_ok());
            assert!(open().authorize(None, resource, Action::Create, None).is_ok());
            assert!(open().authorize(None, resource, Action::Delete, None).is_ok());
        }
    }

    #[test]
    fn test_catalog_restricted_writes() {
        let policy = restricted();
        assert!(policy.authorize(None, Resource::Product, Action::Read, None).is_ok());
        assert!(matches!(
            policy.authorize(None, Resource::Product, Action::Create, None),
            Err(AppError::AuthError(_))
        ));
        assert!(matches!(
            policy.authorize(Some(&user(1)), Resource::Coupon, Action::Update, None),
            Err(AppError::PermissionDenied)
        ));
        assert!(
            policy
                .authorize(Some(&staff(2)), Resource::Category, Action::Delete, None)
                .is_ok()
        );
    }

    #[test]
    fn test_address_is_owner_only_even_for_staff() {
        let policy = open();
        assert!(
            policy
                .authorize(Some(&user(1)), Resource::Address, Action::Update, Some(1))
                .is_ok()
        );
        assert!(
            policy
                .authorize(Some(&user(2)), Resource::Address, Action::Read, Some(1))
                .is_err()
        );
        assert!(!policy.can_see(Some(&staff(9)), Resource::Wishlist, 1));
    }

    #[test]
    fn test_order_owner_or_staff() {
        let policy = open();
        assert!(policy.can_see(Some(&user(1)), Resource::Order, 1));
        assert!(!policy.can_see(Some(&user(2)), Resource::Order, 1));
        assert!(policy.can_see(Some(&staff(3)), Resource::Order, 1));
        assert!(!policy.can_see(None, Resource::Order, 1));
        assert!(
            policy
                .authorize(Some(&staff(3)), Resource::Order, Action::Update, Some(1))
                .is_ok()
        );
    }

    #[test]
    fn test_review_read_open_write_owner() {
        let policy = open();
        assert!(policy.authorize(None, Resource::Review, Action::Read, Some(1)).is_ok());
        assert!(matches!(
            policy.authorize(None, Resource::Review, Action::Create, None),
            Err(AppError::AuthError(_))
        ));
        assert!(matches!(
            policy.authorize(Some(&user(2)), Resource::Review, Action::Delete, Some(1)),
            Err(AppError::PermissionDenied)
        ));
        assert!(
            policy
                .authorize(Some(&user(1)), Resource::Review, Action::Update, Some(1))
                .is_ok()
        );
    }

    #[test]
    fn test_users_are_read_only() {
        assert!(open().authorize(None, Resource::User, Action::Read, None).is_ok());
        assert!(matches!(
            open().authorize(Some(&staff(1)), Resource::User, Action::Update, Some(1)),
            Err(AppError::PermissionDenied)
        ));
    }

    #[test]
    fn test_order_list_scope() {
        let policy = open();
        assert_eq!(
            policy.list_scope(Some(&user(1)), Resource::Order, None).unwrap(),
            ListScope::OwnedBy(1)
        );
        assert_eq!(
            policy.list_scope(Some(&staff(2)), Resource::Order, None).unwrap(),
            ListScope::All
        );
        assert_eq!(
            policy.list_scope(Some(&staff(2)), Resource::Order, Some(false)).unwrap(),
            ListScope::OwnedBy(2)
        );
        assert!(matches!(
            policy.list_scope(Some(&user(1)), Resource::Order, Some(true)),
            Err(AppError::PermissionDenied)
        ));
        assert!(policy.list_scope(None, Resource::Order, None).is_err());
    }
}
