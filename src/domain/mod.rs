pub mod entity;
pub mod gateway;
pub mod use_case;
