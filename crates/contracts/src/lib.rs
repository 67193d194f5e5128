//! Общие типы и чистая логика для backend и frontend
//!
//! Собирается и под native, и под `wasm32`: здесь нет ни I/O, ни асинхронности.

pub mod domain;
pub mod shared;
pub mod system;
