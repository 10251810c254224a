mod property;
pub(crate) mod utils;
