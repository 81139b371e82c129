//! Record submission: draft validation, optional avatar upload, create.

pub mod controller;
pub mod draft;
pub mod image;

pub use controller::{FormController, Submission};
pub use draft::RecordForm;
pub use image::ImageUpload;
