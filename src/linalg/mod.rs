//! Dense vector and matrix containers used by the simulation engine.

pub mod element;
pub mod matrix;
pub mod vector;

pub use element::Element;
pub use matrix::Matrix;
pub use vector::Vector;
