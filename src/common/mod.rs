#[cfg(feature = "files")]
mod fs;
mod value;

#[cfg(feature = "files")]
pub(crate) use fs::*;
pub(crate) use value::*;
