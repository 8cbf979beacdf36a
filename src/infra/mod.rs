//! Инфраструктурный слой вокруг движка круглого стола:
//! - RNG-реализации для движка;
//! - выбор RNG по конфигу матча.

pub mod rng;

pub use rng::*;
