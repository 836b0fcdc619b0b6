//! Re-export of the shared named-constant table.
//!
//! The table lives in `alg-parser` because the symbolic parser folds constant names at parse
//! time; the calculator's default [`Ctxt`](crate::numerical::ctxt::Ctxt) seeds its variables from
//! the same table so the two pipelines always agree.

pub use alg_parser::consts::*;
