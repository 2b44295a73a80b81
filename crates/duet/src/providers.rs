pub mod base;
pub mod configs;
pub mod llama_cpp;

#[cfg(test)]
pub mod mock;
