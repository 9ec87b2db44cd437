//! Argument parsing: a raw token list becomes positionals plus options.
//!
//! The classification rules interact (aliases rewrite before anything else
//! looks at a token, flags change both coercion and lookahead, `--` and
//! stop-at-positional cut classification short), so the whole pass lives
//! in one ordered loop in `parser`.

mod parsed;
mod parser;
mod value;

pub use parsed::ParsedArgs;
pub use parser::{parse, ParserConfig};
pub use value::{is_truthy, ArgValue};
