pub mod news_feed;
pub mod token_store;

pub use news_feed::{NewsDocument, NewsFeed};
pub use token_store::TokenStore;
