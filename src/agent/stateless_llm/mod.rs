pub mod stateless_llm_interface;
pub mod openai_responses_llm;

pub use stateless_llm_interface::*;
pub use openai_responses_llm::*;
