pub mod directory;
pub mod filters;
pub mod health;
pub mod suggestions;

pub use directory::SharedPractitionerRepo;
