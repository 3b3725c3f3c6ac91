//! Repository ports (interfaces) the trail services depend on.
//! Implementations live under `database::infrastructure`.

pub mod trails;
