pub mod dtos;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod policy;
pub mod routes;
pub mod services;

pub use policy::UploadPolicy;
pub use routes::routes;
pub use services::FileService;
