pub use super::cache_entries::Entity as CacheEntries;
pub use super::users::Entity as Users;
