//! File system helpers

mod atomic;
mod home;
mod lookup;

pub use atomic::{copy_file, write_atomic};
pub use home::{krnr_home_dir, KRNR_TEST_HOME_VAR};
pub use lookup::find_executable;
