pub mod api;
pub mod scheme;
pub mod util;

#[cfg(test)]
pub mod tests;
