//! Wire-format data models.
//!
//! This module contains the request/response bodies exchanged with the
//! upstream chat-completion endpoints (`chat`).

// Author: kelexine (https://github.com/kelexine)

pub mod chat;

pub use chat::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ContentPart, ImageUrl, Message,
    MessageContent, ResponseMessage, Role,
};
