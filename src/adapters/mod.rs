//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                  |
//! |------------|-------------|------------------------------|
//! | `hardware` | SensorPort  | thermistor ADC channels      |
//! |            | RelayPort   | heater relay GPIO            |
//! | `log_sink` | EventSink   | Serial log output            |

pub mod hardware;
pub mod log_sink;
