//! Factory Strict Output Contract
//!
//! Grammar-driven parser and validator for the patch text a code-generation
//! model returns. Anything that is not a well-formed patch touching only
//! sanctioned paths is rejected with the complete list of violations.
//!
//! # Contract
//!
//! ````text
//! ### FACTORY/1 PATCH
//! - file: backend/api/users.py
//! ```diff
//! --- a/backend/api/users.py
//! +++ b/backend/api/users.py
//! @@ ...
//! ```
//! ### END
//! ````
//!
//! # Example
//!
//! ```rust,ignore
//! use factory_soc::SocParser;
//!
//! let parser = SocParser::with_allow_list(["backend/", "frontend/", "api/"]);
//! parser.validate_input(&output)?;
//! let patch = parser.parse(&output)?;
//! assert!(patch.valid);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod contamination;
pub mod diff;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod patch;
pub mod policy;
pub mod state;

pub use diff::{split_sections, validate_diff, FileSection};
pub use error::{ConfigError, DiffError, InputError, SocError, SocResult};
pub use grammar::{LineKind, HEADER, TRAILER};
pub use parser::{SocConfig, SocParser};
pub use patch::Patch;
pub use policy::{escapes_root, is_path_allowed, PathPolicy};
pub use state::{transition, Effect, ParserState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for parsing model output
    pub use crate::{InputError, Patch, SocConfig, SocError, SocParser};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
