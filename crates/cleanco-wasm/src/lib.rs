use cleanco_core::{BasenameOptions, Positions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn basename(name: &str, suffix: bool, prefix: bool, middle: bool) -> String {
    let positions = Positions::from(BasenameOptions {
        suffix,
        prefix,
        middle,
    });
    cleanco_core::basename(name, positions)
}

#[wasm_bindgen]
pub fn classify(name: &str) -> String {
    let classification = cleanco_core::classify(name);
    serde_json::to_string(&classification).unwrap_or_else(|_| "{}".to_string())
}
