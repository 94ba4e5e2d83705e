//! # encodable
//!
//! Core contract for types that can travel through a tagged envelope.
//!
//! A type opts in by implementing [`Encodable`]: it declares a name and
//! provides two conversions, one projecting an instance into a structured
//! value and one rebuilding an instance from such a value.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! instance → Value → Envelope → String
//! String → Envelope → (registry lookup by name) → Value → instance
//! ```
//!
//! The structured value model is [`serde_json::Value`]: null, booleans,
//! numbers, strings, arrays and string-keyed objects. Object keys keep their
//! insertion order.
//!
//! The `Decoder` and `Encoder` traits describe the text-level steps of that
//! pipeline and are implemented by the `envelope` crate. Type lookup and the
//! `dumps`/`loads` entry points live in the `registry` crate.
//!
//! ## Example
//!
//! ```
//! use encodable::{BoxError, Encodable, Value};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Encodable for Point {
//!     const NAME: &'static str = "Point";
//!
//!     fn to_structured_data(&self) -> Result<Value, BoxError> {
//!         Ok(json!({ "x": self.x, "y": self.y }))
//!     }
//!
//!     fn from_structured_data(data: Value) -> Result<Self, BoxError> {
//!         let x = data["x"].as_i64().ok_or("missing x")?;
//!         let y = data["y"].as_i64().ok_or("missing y")?;
//!         Ok(Point { x, y })
//!     }
//! }
//!
//! let p = Point { x: 1, y: 2 };
//! let data = p.to_structured_data().unwrap();
//! assert_eq!(Point::from_structured_data(data).unwrap(), p);
//! ```

#![forbid(unsafe_code)]

mod contract;
pub mod decoder;
pub mod encoder;
pub mod serde_data;

pub use contract::{AnyEncodable, BoxError, Encodable};
pub use serde_json::Value;
