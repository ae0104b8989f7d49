pub mod features;
pub mod labels;
pub mod training;
pub mod model;
pub mod scoring;
