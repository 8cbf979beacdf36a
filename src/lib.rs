//! Движок игры за круглым столом: вариант задачи Иосифа Флавия,
//! где участники устраняют соседей, спасают выбывших и крадут у богатейшего.
//!
//! Слои:
//! - `domain` – участники, стол, стопка выбывших, конфиг;
//! - `engine` – автомат хода и проверка действий;
//! - `api` – снимки и ошибки для слоя отображения;
//! - `infra` – RNG;
//! - `runtime` – фоновый цикл ходов на tokio.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod runtime;
