pub mod bytes;
pub mod error;
pub mod fs;
pub mod path;
pub mod string;
pub mod time;
