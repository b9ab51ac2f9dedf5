pub mod input_types;
pub mod output_types;
pub mod prompts;
pub mod stateless_llm_factory;

pub mod stateless_llm;
