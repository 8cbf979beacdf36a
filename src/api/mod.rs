//! Внешний API движка для слоя отображения.
//!
//! Здесь описываются:
//! - запросы (queries.rs) – только чтение, сборка снимка;
//! - DTO (dto.rs) – копии состояния для отрисовки;
//! - ошибки (errors.rs) – то, что видит слой отображения.

pub mod dto;
pub mod errors;
pub mod queries;

pub use dto::*;
pub use errors::*;
pub use queries::*;
