//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod export;
pub mod fallback;
pub mod health;
pub mod lookup;
pub mod qr;
pub mod shorten;
pub mod update;

pub use export::{
    export_csv_handler, export_lookup_csv_handler, export_qr_zip_handler,
    export_update_csv_handler,
};
pub use fallback::method_fallback;
pub use health::health_handler;
pub use lookup::{batch_lookup_handler, lookup_handler};
pub use qr::qr_generate_handler;
pub use shorten::shorten_handler;
pub use update::batch_update_handler;
