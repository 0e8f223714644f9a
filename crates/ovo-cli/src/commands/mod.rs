pub mod new;
pub mod templates;
