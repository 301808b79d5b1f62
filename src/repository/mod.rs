pub mod practitioner;

pub use practitioner::PractitionerRepository;
