//! Pipeline entry points for portal operations.
//!
//! - `login`: Authenticate a fresh session
//! - `run_submit`: Validate the preferences file and submit it
//! - `run_generate`: Write the portal's station list as a preferences file
//! - `run_hypergen`: Write a ranked preferences file

pub mod generate;
pub mod hypergen;
pub mod login;
pub mod submit;

pub use generate::run_generate;
pub use hypergen::run_hypergen;
pub use login::login;
pub use submit::run_submit;
