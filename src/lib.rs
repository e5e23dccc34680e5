pub mod app;
pub mod clock;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{Bucket, ModalResult, Period, Selection};
pub use state::AppState;
pub use stats::{bucketize, modal_category};
pub use storage::{load_data, resolve_data_path};
