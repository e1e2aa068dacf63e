pub(crate) mod redb_store;
pub(crate) mod store;
