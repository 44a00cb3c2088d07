//! Sensor module - simulated sensors and their rolling history

mod history;
mod manager;
mod sensor;
mod simulator;

pub use history::HistoryBuffer;
pub use manager::{Reading, SensorBank};
pub use sensor::{Sensor, SensorKind, SensorSnapshot};
pub use simulator::{step, SensorSimulator};
