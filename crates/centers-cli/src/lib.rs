//! centers-cli
//! ===========
//!
//! Command-line front-end for the centers directory, built on
//! [`centers-core`](https://docs.rs/centers-core).
//!
//! The crate primarily provides the `centers` binary. This library target
//! only exists so the overview below is rendered on docs.rs.
//!
//! Quick start
//! -----------
//!
//! ```text
//! export API_URL=https://example.org/api
//! centers countries
//! centers states India
//! centers districts India Karnataka
//! centers centers India Karnataka Bengaluru --json
//! centers browse
//! ```
//!
//! Inside `browse`, type a number or a name to pick an entry, `b` to go back
//! one level, `a` for all countries, `c` to confirm the district, `r` to
//! retry and `q` to quit.
//!
//! Links
//! -----
//! - Repository: <https://github.com/holg/centers-rs>
//! - Core crate: <https://docs.rs/centers-core>
#![cfg_attr(docsrs, feature(doc_cfg))]
