//! Request bodies used across the API tests.

use serde_json::{json, Value};

pub fn start_round_request(category: &str, difficulty: &str, seed: Option<u64>) -> Value {
    match seed {
        Some(seed) => json!({ "category": category, "difficulty": difficulty, "seed": seed }),
        None => json!({ "category": category, "difficulty": difficulty }),
    }
}

pub fn flip_request(instance_id: u64) -> Value {
    json!({ "instance_id": instance_id })
}

pub fn tutor_request(message: &str) -> Value {
    json!({
        "message": message,
        "context": "You are a friendly English tutor for Vietnamese children.",
        "conversationHistory": [
            { "role": "user", "content": "Hello!" },
            { "role": "assistant", "content": "Xin chào! 👋" }
        ],
        "studentName": "Lan",
        "studentAge": 6
    })
}
