mod errors;
mod flash;
mod handle;
mod types;

pub use errors::SessionError;
pub use handle::Session;
pub use types::{FLASH_KEY, Flashes, SessionData};
