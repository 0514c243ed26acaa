pub mod assign;
pub mod detail;
pub mod error;
pub mod mapping;
pub mod middleware;
pub mod presence;
pub mod response;
pub mod settings;
pub mod telemetry;

pub use assign::{assign, merge_maps, FieldSource, FieldTarget, Fields};
pub use detail::Detail;
pub use error::Error;
pub use mapping::StatusCodeMapping;
pub use presence::{assert_found, assert_present, Presence};
pub use response::{check_reqwest, check_response, CompletedResponse, HttpResponse};
