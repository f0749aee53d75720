mod model;
mod provider;

pub use provider::BaasAuthProvider;
