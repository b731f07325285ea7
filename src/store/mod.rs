pub mod error;
mod import;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod fixtures;
