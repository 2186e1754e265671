pub mod mood;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;
