//! Arithmetic tools: `add`, `subtract`, `multiply` over integers and
//! `divide` over floats.

pub mod arithmetic;

pub use arithmetic::{AddTool, DivideTool, MultiplyTool, SubtractTool};
