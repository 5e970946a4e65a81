//! Domain types shared by the escape room theme service.

pub mod error;
pub mod theme;
pub mod types;
