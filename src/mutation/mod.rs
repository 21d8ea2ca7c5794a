pub mod compressor;
pub mod mutation_model;
