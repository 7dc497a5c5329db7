//! Request surface for the discussion board.
//!
//! Wraps `board_core` services in deserializable requests and a uniform
//! response envelope so any transport can sit in front of it.

pub mod api;
pub mod envelope;
pub mod request;

pub use api::BoardApi;
pub use envelope::ApiResponse;
pub use request::{
    CreateCommentRequest, CreatePostRequest, DeletePostRequest, ReadCommentsRequest,
    ReadPostsRequest, UpdatePostRequest,
};
