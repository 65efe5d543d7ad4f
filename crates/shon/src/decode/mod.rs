//! SHON notation parsing: tokens to a lazy node tree.
//!
//! | Token                      | Node                         |
//! |----------------------------|------------------------------|
//! | `-t`, `-f`                 | bool                         |
//! | `-n` (or `-u`)             | null                         |
//! | `--` *tok*                 | *tok* as a string            |
//! | empty token                | empty string                 |
//! | `[]`, `[` `]`              | empty array                  |
//! | `[--]`                     | empty object                 |
//! | `[` `--key` ... `]`        | object                       |
//! | `[` ... `]`                | array                        |
//! | anything else              | scalar                       |

pub mod cursor;
mod node;
mod parser;

pub use cursor::Cursor;
pub use node::{ArrayReader, Kind, Node, ObjectReader};
pub use parser::Parser;
