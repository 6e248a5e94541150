pub use super::factories::{RawRowFactory, RecordFactory};

pub struct Factory;

impl Factory {
    pub fn raw_row() -> RawRowFactory {
        RawRowFactory::new()
    }

    pub fn onion_row() -> RawRowFactory {
        RawRowFactory::onion()
    }

    pub fn record() -> RecordFactory {
        RecordFactory::new()
    }
}
