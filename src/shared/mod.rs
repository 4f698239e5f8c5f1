pub mod constants;
pub mod datetime;
pub mod html;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
