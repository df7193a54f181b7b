pub mod presenter;
pub mod prompt;
pub mod session;
pub mod validator;

pub use crate::domain::model::{HumanizeResult, OracleRequest, Settings, Tone};
pub use crate::domain::ports::{Clipboard, Oracle};
pub use crate::utils::error::Result;
