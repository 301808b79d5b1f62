pub mod lenient;
pub mod practitioner;

pub use practitioner::{Address, Clinic, Practitioner, Speciality};
