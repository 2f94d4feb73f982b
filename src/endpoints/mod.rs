pub mod lang;
pub mod mister;
