mod dto;
mod extractors;
mod frontend;
mod handlers;
mod routes;
mod state;

pub use dto::{ScanResponse, UploadResponse};
pub use routes::create_router;
pub use state::AppState;
