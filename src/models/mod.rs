mod hashtag;

pub use hashtag::{
    GenerationRequest, GenerationResponse, HashtagSuggestion, MAX_DESCRIPTION_CHARS, Platform,
    Strategy,
};
