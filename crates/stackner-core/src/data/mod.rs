pub mod reader;
pub mod sentence;

pub use reader::{DOCSTART, example_path, parse_examples, read_examples, read_examples_from_path};
pub use sentence::{LabelTuple, LabeledSentence, OUTSIDE};
