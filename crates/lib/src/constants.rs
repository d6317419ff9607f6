//! Constants used throughout the Homebase library.
//!
//! This module provides central definitions for the reserved keys under
//! which state is persisted in the storage medium.

/// Storage key for the signed-in user record.
pub const CURRENT_USER: &str = "_current_user";

/// Storage key for the derived session object.
pub const CURRENT_SESSION: &str = "_current_session";

/// Storage key for the registered-user collection.
pub const USERS: &str = "_users";

/// Key prefix for named table collections.
pub const TABLE_PREFIX: &str = "_table.";

/// Table that receives analytics events.
pub const ANALYTICS_TABLE: &str = "analytics";
