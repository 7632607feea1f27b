//! Operations module (store implementations)

mod yaml_store;

pub use yaml_store::YamlCaveStore;
