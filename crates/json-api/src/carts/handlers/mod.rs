//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod merge;
pub(crate) mod remove_item;
pub(crate) mod update_item;
