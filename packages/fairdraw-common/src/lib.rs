pub mod randomness;
pub mod vrf;

pub use randomness::derive_random_words;
pub use vrf::{ConsumerExecuteMsg, CoordinatorExecuteMsg};
