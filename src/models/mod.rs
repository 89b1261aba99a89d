//! Data models: domain records, REST wire types and editable form state.

pub mod api;
pub mod form;
pub mod schema;
