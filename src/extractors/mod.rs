//! Request extractors.

mod flash;
pub use flash::{Flash, Notice, FLASH_COOKIE};
