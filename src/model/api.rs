use serde::{Deserialize, Serialize};

/// JSON body of every error response produced by the gateway itself.
#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
