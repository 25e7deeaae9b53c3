//! # docfill
//!
//! Fills labeled form fields in Word documents using `docx_rust`, with a
//! converter chain that upgrades legacy `.doc` input to `.docx` first.
//!
//! ## Example
//!
//! ```no_run
//! use docfill::FormFiller;
//! use std::collections::HashMap;
//!
//! let data = HashMap::from([
//!     ("ho_ten".to_string(), "Nguyễn Văn A".to_string()),
//!     ("ngay_sinh".to_string(), "01/01/1990".to_string()),
//! ]);
//!
//! let filler = FormFiller::with_defaults();
//! let (output, replaced) = filler.fill("application.docx", &data).unwrap();
//! println!("{} field(s) -> {}", replaced, output.display());
//! ```

pub mod convert;
pub mod error;
pub mod fields;
pub mod filler;

pub use convert::doc_to_docx;
pub use error::{Error, Result};
pub use fields::FieldTable;
pub use filler::FormFiller;
