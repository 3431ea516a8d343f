//! Request extractors that reject with [`common::AppError`].

mod app_json;
mod app_path;

pub use app_json::AppJson;
pub use app_path::AppPath;
