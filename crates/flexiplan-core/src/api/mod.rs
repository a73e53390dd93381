pub mod client;
pub mod models;
pub mod request;

mod hobbies;
mod messages;
mod profile;
mod routine;
mod social;
mod tasks;

pub use profile::{UPLOAD_PFP_ENDPOINT, mime_for_upload};
