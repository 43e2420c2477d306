pub mod builder;
pub mod inspect;
