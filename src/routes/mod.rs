pub mod api;
pub mod browse;
pub mod play;
pub mod ytcast;

pub use api::{get_listing, health};
pub use browse::{browse_path, browse_root};
pub use play::{play, PlayParams};
pub use ytcast::{ytcast_list, ytcast_pair, ytcast_set_code};

use crate::error::Error;

/// A directory that cannot be scanned is reported as a missing path
pub(crate) fn listing_error(e: Error) -> Error {
    match e {
        Error::Io(io) => {
            tracing::debug!("Listing failed: {}", io);
            Error::NotFound("unable to read path".to_string())
        }
        other => other,
    }
}
