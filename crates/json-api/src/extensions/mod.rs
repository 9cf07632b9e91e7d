//! Extension traits

mod dates;
mod depot;
mod result;

pub(crate) use dates::DateQueryExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
