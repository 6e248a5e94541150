pub mod raw_row_factory;
pub mod record_factory;

pub use raw_row_factory::RawRowFactory;
pub use record_factory::RecordFactory;

#[cfg(test)]
mod raw_row_factory_test;
#[cfg(test)]
mod record_factory_test;
