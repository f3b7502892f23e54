//! Types shared by the directory backend and the Yew client: the persisted
//! model, request payloads, the JSON response envelope and the client-side
//! query cache contract.

pub mod cache;
pub mod model;
pub mod requests;
pub mod responses;
