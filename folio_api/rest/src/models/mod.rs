use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: &'static str,
}
